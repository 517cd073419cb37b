//! Actor entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An actor row from the `actors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub photo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Actor plus the number of movies it appears in (list view).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActorWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub actor: Actor,
    pub count_movies: i64,
}

/// Full replacement body for `PUT /actors/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActorDto {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(custom(function = "cinema_core::slug::validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub photo: String,
}
