//! Movie entity model and DTOs.

use cinema_core::catalog::{MAX_DURATION_MINS, MAX_RELEASE_YEAR, MIN_RELEASE_YEAR};
use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::actor::Actor;
use crate::models::genre::Genre;

/// Descriptive parameters, stored as flat columns and exposed as a nested
/// `parameters` object.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct MovieParameters {
    #[validate(range(min = MIN_RELEASE_YEAR, max = MAX_RELEASE_YEAR))]
    pub year: Option<i32>,
    /// Running time in minutes.
    #[validate(range(min = 1, max = MAX_DURATION_MINS))]
    pub duration: Option<i32>,
    pub country: Option<String>,
}

/// A movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub poster: String,
    pub big_poster: String,
    pub title: String,
    pub slug: String,
    #[sqlx(flatten)]
    pub parameters: MovieParameters,
    /// Average of all user ratings (4.0 until the first rating).
    pub rating: f64,
    pub video_url: String,
    pub count_opened: i32,
    pub genre_ids: Vec<DbId>,
    pub actor_ids: Vec<DbId>,
    /// Whether the publication notice has been delivered.
    pub is_send_telegram: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie with its actor and genre references resolved.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub actors: Vec<Actor>,
    pub genres: Vec<Genre>,
}

/// Full replacement body for `PUT /movies/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MovieDto {
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub big_poster: String,
    #[validate(length(min = 1, max = 300, message = "must be 1-300 characters"))]
    pub title: String,
    #[validate(custom(function = "cinema_core::slug::validate_slug"))]
    pub slug: String,
    #[serde(default)]
    #[validate(nested)]
    pub parameters: MovieParameters,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub actor_ids: Vec<DbId>,
}

/// Body for `POST /movies/by-genres`.
#[derive(Debug, Clone, Deserialize)]
pub struct ByGenres {
    #[serde(alias = "genresIds")]
    pub genre_ids: Vec<DbId>,
}

/// Body for `PUT /movies/update-count-opened`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountOpened {
    pub slug: String,
}
