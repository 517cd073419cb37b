//! Genre entity model, DTOs and the collections view.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A genre row from the `genres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full replacement body for `PUT /genres/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenreDto {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    #[validate(custom(function = "cinema_core::slug::validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// One tile of the genre collections view: a genre illustrated by the big
/// poster of its newest movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub image: String,
}
