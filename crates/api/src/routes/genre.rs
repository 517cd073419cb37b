//! Route definitions for the `/genres` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::genre;
use crate::state::AppState;

/// Routes mounted at `/genres`.
///
/// ```text
/// GET    /by-slug/{slug}   -> get_by_slug
/// GET    /collections      -> collections
/// GET    /                 -> list
/// POST   /                 -> create (admin)
/// GET    /{id}             -> get_by_id (admin)
/// PUT    /{id}             -> update (admin)
/// DELETE /{id}             -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/by-slug/{slug}", get(genre::get_by_slug))
        .route("/collections", get(genre::collections))
        .route("/", get(genre::list).post(genre::create))
        .route(
            "/{id}",
            get(genre::get_by_id)
                .put(genre::update)
                .delete(genre::delete),
        )
}
