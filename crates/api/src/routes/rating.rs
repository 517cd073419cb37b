//! Route definitions for the `/ratings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rating;
use crate::state::AppState;

/// Routes mounted at `/ratings`.
///
/// ```text
/// POST /set-rating    -> set_rating (auth)
/// GET  /{movie_id}    -> get_movie_value (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/set-rating", post(rating::set_rating))
        .route("/{movie_id}", get(rating::get_movie_value))
}
