//! Handlers for the `/genres` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_db::models::genre::{Collection, Genre, GenreDto};
use cinema_db::repositories::GenreRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::state::AppState;

/// GET /api/v1/genres/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Genre>> {
    let genre = GenreRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBy {
            entity: "Genre",
            field: "slug",
            value: slug,
        }))?;
    Ok(Json(genre))
}

/// GET /api/v1/genres/collections
///
/// One card per genre that has movies, illustrated with the big poster of
/// its newest movie.
pub async fn collections(State(state): State<AppState>) -> AppResult<Json<Vec<Collection>>> {
    let collections = GenreRepo::collections(&state.pool).await?;
    Ok(Json(collections))
}

/// GET /api/v1/genres
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = GenreRepo::list(&state.pool, params.pattern().as_deref()).await?;
    Ok(Json(genres))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Genre",
            id,
        }))?;
    Ok(Json(genre))
}

/// POST /api/v1/genres
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DbId>> {
    let id = GenreRepo::create_blank(&state.pool).await?;
    tracing::info!(genre_id = id, user_id = admin.user_id, "Blank genre created");
    Ok(Json(id))
}

/// PUT /api/v1/genres/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<GenreDto>,
) -> AppResult<Json<Genre>> {
    input.validate()?;
    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Genre",
            id,
        }))?;
    Ok(Json(genre))
}

/// DELETE /api/v1/genres/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = GenreRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Genre",
            id,
        }))?;
    Ok(Json(genre))
}
