//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /profile             -> profile (auth)
/// PUT    /profile             -> update_profile (auth)
/// GET    /profile/favorites   -> favorites (auth)
/// PUT    /profile/favorites   -> toggle_favorite (auth)
/// GET    /count               -> count (admin)
/// GET    /                    -> list (admin)
/// GET    /{id}                -> get_by_id (admin)
/// PUT    /{id}                -> update (admin)
/// DELETE /{id}                -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::profile).put(user::update_profile))
        .route(
            "/profile/favorites",
            get(user::favorites).put(user::toggle_favorite),
        )
        .route("/count", get(user::count))
        .route("/", get(user::list))
        .route(
            "/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
}
