//! Domain primitives shared by the database and API crates.
//!
//! Nothing in here performs I/O: these are id/timestamp aliases, the
//! domain error type, and the pure rules (slugs, search terms, ratings,
//! request validation) the handlers apply before touching the database.

pub mod catalog;
pub mod error;
pub mod rating;
pub mod roles;
pub mod search;
pub mod slug;
pub mod types;
