pub mod actor;
pub mod auth;
pub mod genre;
pub mod health;
pub mod movie;
pub mod rating;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /actors                                          list (public), create (admin)
/// /actors/by-slug/{slug}                           get by slug (public)
/// /actors/{id}                                     get, update, delete (admin)
///
/// /genres                                          list (public), create (admin)
/// /genres/by-slug/{slug}                           get by slug (public)
/// /genres/collections                              collection cards (public)
/// /genres/{id}                                     get, update, delete (admin)
///
/// /movies                                          list (public), create (admin)
/// /movies/by-slug/{slug}                           populated movie (public)
/// /movies/by-actor/{actor_id}                      movies of an actor (public)
/// /movies/by-genres                                movies of genres (POST, public)
/// /movies/most-popular                             most opened (public)
/// /movies/update-count-opened                      bump open counter (PUT, public)
/// /movies/{id}                                     get, update, delete (admin)
///
/// /ratings/{movie_id}                              caller's rating (auth)
/// /ratings/set-rating                              rate a movie (POST, auth)
///
/// /users/profile                                   get, update own profile (auth)
/// /users/profile/favorites                         list, toggle favorites (auth)
/// /users/count                                     user count (admin)
/// /users                                           list (admin)
/// /users/{id}                                      get, update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/actors", actor::router())
        .nest("/genres", genre::router())
        .nest("/movies", movie::router())
        .nest("/ratings", rating::router())
        .nest("/users", user::router())
}
