//! Route definitions for the `/actors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::actor;
use crate::state::AppState;

/// Routes mounted at `/actors`.
///
/// ```text
/// GET    /by-slug/{slug}   -> get_by_slug
/// GET    /                 -> list
/// POST   /                 -> create (admin)
/// GET    /{id}             -> get_by_id (admin)
/// PUT    /{id}             -> update (admin)
/// DELETE /{id}             -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/by-slug/{slug}", get(actor::get_by_slug))
        .route("/", get(actor::list).post(actor::create))
        .route(
            "/{id}",
            get(actor::get_by_id)
                .put(actor::update)
                .delete(actor::delete),
        )
}
