//! Repository for the `ratings` table.

use cinema_core::rating::DEFAULT_MOVIE_RATING;
use cinema_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::rating::Rating;
use crate::repositories::MovieRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, movie_id, value, created_at, updated_at";

/// Provides rating queries and the movie-average write-back.
pub struct RatingRepo;

impl RatingRepo {
    /// The value a user gave a movie, if they rated it.
    pub async fn find_value(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<i16>, sqlx::Error> {
        sqlx::query_scalar("SELECT value FROM ratings WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Average of all ratings for a movie, or `None` if it has none.
    pub async fn average_for_movie<'e, E>(
        executor: E,
        movie_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT AVG(value)::FLOAT8 FROM ratings WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(executor)
            .await
    }

    /// Rewrite the stored average of each movie from its remaining ratings,
    /// falling back to the default rating for movies left with none.
    ///
    /// Callers hold the movie row locks. Returns the number of movies updated.
    pub async fn recompute_averages(
        conn: &mut PgConnection,
        movie_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies m SET rating = COALESCE(
                 (SELECT AVG(r.value)::FLOAT8 FROM ratings r WHERE r.movie_id = m.id),
                 $2
             )
             WHERE m.id = ANY($1)",
        )
        .bind(movie_ids)
        .bind(DEFAULT_MOVIE_RATING)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Upsert a user's rating and write the movie's new average back onto
    /// the movie, all in one transaction.
    ///
    /// The movie row is locked first, so concurrent submissions for the same
    /// movie serialize and each sees every committed rating. Returns the
    /// rating and the new average, or `None` if the movie does not exist.
    pub async fn set_rating(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        value: i16,
    ) -> Result<Option<(Rating, f64)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(movie_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO ratings (user_id, movie_id, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, movie_id) DO UPDATE SET value = EXCLUDED.value
             RETURNING {COLUMNS}"
        );
        let rating = sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(value)
            .fetch_one(&mut *tx)
            .await?;

        let average = Self::average_for_movie(&mut *tx, movie_id)
            .await?
            .unwrap_or(DEFAULT_MOVIE_RATING);

        MovieRepo::update_rating(&mut *tx, movie_id, average).await?;

        tx.commit().await?;

        tracing::debug!(movie_id, user_id, value, average, "Movie rating recomputed");
        Ok(Some((rating, average)))
    }
}
