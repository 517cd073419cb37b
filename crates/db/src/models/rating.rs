//! Rating entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rating row from the `ratings` table. One per (user, movie).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /ratings/set-rating`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRating {
    #[serde(alias = "movieId")]
    pub movie_id: DbId,
    pub value: i16,
}
