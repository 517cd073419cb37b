//! Handlers for the `/ratings` resource.

use axum::extract::{Path, State};
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::rating::validate_rating;
use cinema_core::types::DbId;
use cinema_db::models::rating::{Rating, SetRating};
use cinema_db::repositories::RatingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/ratings/{movie_id}
///
/// The caller's own rating for the movie, `0` when they have not rated it.
pub async fn get_movie_value(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<i16>> {
    let value = RatingRepo::find_value(&state.pool, user.user_id, movie_id)
        .await?
        .unwrap_or(0);
    Ok(Json(value))
}

/// POST /api/v1/ratings/set-rating
///
/// Upserts the caller's rating and refreshes the movie's average.
pub async fn set_rating(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<SetRating>,
) -> AppResult<Json<Rating>> {
    validate_rating(input.value).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (rating, average) =
        RatingRepo::set_rating(&state.pool, user.user_id, input.movie_id, input.value)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Movie",
                id: input.movie_id,
            }))?;

    tracing::info!(
        movie_id = input.movie_id,
        user_id = user.user_id,
        value = input.value,
        average,
        "Rating set",
    );

    Ok(Json(rating))
}
