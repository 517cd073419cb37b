//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` request DTO, validated with `validator` where the
//!   client supplies free-form fields

pub mod actor;
pub mod genre;
pub mod movie;
pub mod rating;
pub mod session;
pub mod user;
