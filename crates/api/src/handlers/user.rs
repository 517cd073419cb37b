//! Handlers for the `/users` resource: the caller's own profile and
//! favorites, plus admin user management.

use axum::extract::{Path, Query, State};
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_db::models::movie::MovieDetail;
use cinema_db::models::user::{UpdateUser, UserResponse};
use cinema_db::repositories::{MovieRepo, UserRepo};
use cinema_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::auth::normalize_email;
use crate::auth::password::{hash_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::handlers::movie::populate;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::SearchParams;
use crate::state::AppState;

/// Body for `PUT /users/profile` and `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserDto {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "must be at least 6 characters"))]
    pub password: Option<String>,
    /// Only honoured on the admin endpoint.
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Body for `PUT /users/profile/favorites`.
#[derive(Debug, Deserialize)]
pub struct ToggleFavorite {
    #[serde(alias = "movieId")]
    pub movie_id: DbId,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Validate and apply an update to user `id`.
async fn apply_update(
    pool: &DbPool,
    id: DbId,
    input: UpdateUserDto,
    allow_role_change: bool,
) -> AppResult<UserResponse> {
    let input = UpdateUserDto {
        email: normalize_email(&input.email),
        ..input
    };
    input.validate()?;

    if let Some(existing) = UserRepo::find_by_email(pool, &input.email).await? {
        if existing.id != id {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let update = UpdateUser {
        email: Some(input.email),
        password_hash,
        is_admin: if allow_role_change { input.is_admin } else { None },
    };

    let user = UserRepo::update(pool, id, &update)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(user.into())
}

// ---------------------------------------------------------------------------
// Own profile
// ---------------------------------------------------------------------------

/// GET /api/v1/users/profile
pub async fn profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| user_not_found(user.user_id))?;
    Ok(Json(found.into()))
}

/// PUT /api/v1/users/profile
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserDto>,
) -> AppResult<Json<UserResponse>> {
    let updated = apply_update(&state.pool, user.user_id, input, false).await?;
    Ok(Json(updated))
}

/// GET /api/v1/users/profile/favorites
pub async fn favorites(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieDetail>>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| user_not_found(user.user_id))?;

    let movies = MovieRepo::list_by_ids(&state.pool, &found.favorite_ids).await?;
    Ok(Json(populate(&state.pool, movies).await?))
}

/// PUT /api/v1/users/profile/favorites
///
/// Adds the movie to the caller's favorites, or removes it if present.
pub async fn toggle_favorite(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ToggleFavorite>,
) -> AppResult<Json<Vec<DbId>>> {
    if !MovieRepo::exists(&state.pool, input.movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: input.movie_id,
        }));
    }

    let favorite_ids = UserRepo::toggle_favorite(&state.pool, user.user_id, input.movie_id)
        .await?
        .ok_or_else(|| user_not_found(user.user_id))?;
    Ok(Json(favorite_ids))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/users/count
pub async fn count(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<i64>> {
    Ok(Json(UserRepo::count(&state.pool).await?))
}

/// GET /api/v1/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool, params.pattern().as_deref()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserDto>,
) -> AppResult<Json<UserResponse>> {
    let updated = apply_update(&state.pool, id, input, true).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(Json(user.into()))
}
