//! Handlers for the `/actors` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_db::models::actor::{Actor, ActorDto, ActorWithCount};
use cinema_db::repositories::ActorRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::state::AppState;

/// GET /api/v1/actors/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Actor>> {
    let actor = ActorRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBy {
            entity: "Actor",
            field: "slug",
            value: slug,
        }))?;
    Ok(Json(actor))
}

/// GET /api/v1/actors
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ActorWithCount>>> {
    let actors = ActorRepo::list(&state.pool, params.pattern().as_deref()).await?;
    Ok(Json(actors))
}

/// GET /api/v1/actors/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Actor>> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))?;
    Ok(Json(actor))
}

/// POST /api/v1/actors
///
/// Inserts a blank actor for the admin panel to fill in; responds with its id.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DbId>> {
    let id = ActorRepo::create_blank(&state.pool).await?;
    tracing::info!(actor_id = id, user_id = admin.user_id, "Blank actor created");
    Ok(Json(id))
}

/// PUT /api/v1/actors/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ActorDto>,
) -> AppResult<Json<Actor>> {
    input.validate()?;
    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))?;
    Ok(Json(actor))
}

/// DELETE /api/v1/actors/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Actor>> {
    let actor = ActorRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))?;
    Ok(Json(actor))
}
