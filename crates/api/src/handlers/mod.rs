//! HTTP handlers, one module per resource.

pub mod actor;
pub mod auth;
pub mod genre;
pub mod movie;
pub mod rating;
pub mod user;
