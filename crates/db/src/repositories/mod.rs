//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod rating_repo;
pub mod session_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use rating_repo::RatingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
