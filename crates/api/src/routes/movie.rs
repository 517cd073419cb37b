//! Route definitions for the `/movies` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /by-slug/{slug}         -> get_by_slug
/// GET    /by-actor/{actor_id}    -> by_actor
/// POST   /by-genres              -> by_genres
/// GET    /most-popular           -> most_popular
/// PUT    /update-count-opened    -> update_count_opened
/// GET    /                       -> list
/// POST   /                       -> create (admin)
/// GET    /{id}                   -> get_by_id (admin)
/// PUT    /{id}                   -> update (admin)
/// DELETE /{id}                   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/by-slug/{slug}", get(movie::get_by_slug))
        .route("/by-actor/{actor_id}", get(movie::by_actor))
        .route("/by-genres", post(movie::by_genres))
        .route("/most-popular", get(movie::most_popular))
        .route("/update-count-opened", put(movie::update_count_opened))
        .route("/", get(movie::list).post(movie::create))
        .route(
            "/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
}
