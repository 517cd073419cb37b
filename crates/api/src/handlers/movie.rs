//! Handlers for the `/movies` resource.
//!
//! Movies reference actors and genres through id arrays; the public read
//! endpoints resolve those into full objects with one query per table.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use cinema_core::catalog::{dedup_ids, missing_ids, movie_page_url};
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_db::models::actor::Actor;
use cinema_db::models::genre::Genre;
use cinema_db::models::movie::{ByGenres, CountOpened, Movie, MovieDetail, MovieDto};
use cinema_db::repositories::{ActorRepo, GenreRepo, MovieRepo};
use cinema_db::DbPool;
use cinema_events::MovieAnnouncement;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Population helpers
// ---------------------------------------------------------------------------

/// Resolve the actor and genre ids of every movie into full objects.
///
/// References to rows that no longer exist are skipped.
pub(crate) async fn populate(pool: &DbPool, movies: Vec<Movie>) -> AppResult<Vec<MovieDetail>> {
    let actor_ids = dedup_ids(
        &movies
            .iter()
            .flat_map(|m| m.actor_ids.iter().copied())
            .collect::<Vec<_>>(),
    );
    let genre_ids = dedup_ids(
        &movies
            .iter()
            .flat_map(|m| m.genre_ids.iter().copied())
            .collect::<Vec<_>>(),
    );

    let actors: HashMap<DbId, Actor> = ActorRepo::find_by_ids(pool, &actor_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let genres: HashMap<DbId, Genre> = GenreRepo::find_by_ids(pool, &genre_ids)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    Ok(movies
        .into_iter()
        .map(|movie| MovieDetail {
            actors: movie
                .actor_ids
                .iter()
                .filter_map(|id| actors.get(id).cloned())
                .collect(),
            genres: movie
                .genre_ids
                .iter()
                .filter_map(|id| genres.get(id).cloned())
                .collect(),
            movie,
        })
        .collect())
}

/// Reject a movie body that references actors or genres that do not exist.
async fn ensure_references_exist(pool: &DbPool, input: &MovieDto) -> AppResult<()> {
    let found: Vec<DbId> = ActorRepo::find_by_ids(pool, &input.actor_ids)
        .await?
        .iter()
        .map(|a| a.id)
        .collect();
    let missing = missing_ids(&input.actor_ids, &found);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!("Unknown actor ids: {missing:?}")));
    }

    let found: Vec<DbId> = GenreRepo::find_by_ids(pool, &input.genre_ids)
        .await?
        .iter()
        .map(|g| g.id)
        .collect();
    let missing = missing_ids(&input.genre_ids, &found);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!("Unknown genre ids: {missing:?}")));
    }

    Ok(())
}

/// Announce a movie that has not been announced yet.
///
/// The flag is claimed before sending so concurrent saves deliver at most one
/// message. A failed delivery is logged and the claim released, so the next
/// save tries again; it never fails the update.
async fn announce_once(state: &AppState, movie: &mut Movie) -> AppResult<()> {
    if movie.is_send_telegram || !state.notifier.is_enabled() {
        return Ok(());
    }
    if !MovieRepo::claim_announcement(&state.pool, movie.id).await? {
        tracing::debug!(movie_id = movie.id, "Announcement already claimed");
        return Ok(());
    }

    let announcement = MovieAnnouncement {
        title: movie.title.clone(),
        poster: movie.poster.clone(),
        watch_url: movie_page_url(&state.config.client_url, &movie.slug),
    };

    match state.notifier.movie_published(&announcement).await {
        Ok(()) => {
            movie.is_send_telegram = true;
            tracing::info!(movie_id = movie.id, url = %announcement.watch_url, "Movie announced");
        }
        Err(e) => {
            tracing::warn!(movie_id = movie.id, error = %e, "Movie announcement failed");
            MovieRepo::release_announcement(&state.pool, movie.id).await?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<MovieDetail>> {
    let movie = MovieRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBy {
            entity: "Movie",
            field: "slug",
            value: slug,
        }))?;

    let detail = populate(&state.pool, vec![movie])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("populate dropped a movie".into()))?;
    Ok(Json(detail))
}

/// GET /api/v1/movies/by-actor/{actor_id}
pub async fn by_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<DbId>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list_by_actor(&state.pool, actor_id).await?;
    Ok(Json(movies))
}

/// POST /api/v1/movies/by-genres
pub async fn by_genres(
    State(state): State<AppState>,
    Json(input): Json<ByGenres>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list_by_genres(&state.pool, &dedup_ids(&input.genre_ids)).await?;
    Ok(Json(movies))
}

/// GET /api/v1/movies/most-popular
pub async fn most_popular(State(state): State<AppState>) -> AppResult<Json<Vec<MovieDetail>>> {
    let movies = MovieRepo::most_popular(&state.pool).await?;
    Ok(Json(populate(&state.pool, movies).await?))
}

/// GET /api/v1/movies
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MovieDetail>>> {
    let movies = MovieRepo::list(&state.pool, params.pattern().as_deref()).await?;
    Ok(Json(populate(&state.pool, movies).await?))
}

/// PUT /api/v1/movies/update-count-opened
pub async fn update_count_opened(
    State(state): State<AppState>,
    Json(input): Json<CountOpened>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::increment_count_opened(&state.pool, &input.slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBy {
            entity: "Movie",
            field: "slug",
            value: input.slug,
        }))?;
    Ok(Json(movie))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;
    Ok(Json(movie))
}

/// POST /api/v1/movies
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DbId>> {
    let id = MovieRepo::create_blank(&state.pool).await?;
    tracing::info!(movie_id = id, user_id = admin.user_id, "Blank movie created");
    Ok(Json(id))
}

/// PUT /api/v1/movies/{id}
///
/// Replaces the editable fields, then announces the movie if it has never
/// been announced.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MovieDto>,
) -> AppResult<Json<Movie>> {
    input.validate()?;
    let input = MovieDto {
        genre_ids: dedup_ids(&input.genre_ids),
        actor_ids: dedup_ids(&input.actor_ids),
        ..input
    };
    ensure_references_exist(&state.pool, &input).await?;

    let mut movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;

    announce_once(&state, &mut movie).await?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;
    Ok(Json(movie))
}
