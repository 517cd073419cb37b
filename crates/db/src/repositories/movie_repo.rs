//! Repository for the `movies` table.

use cinema_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::movie::{Movie, MovieDto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, poster, big_poster, title, slug, year, duration, country, rating, \
                        video_url, count_opened, genre_ids, actor_ids, is_send_telegram, \
                        created_at, updated_at";

/// Provides CRUD and catalog queries for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a blank movie and return its id.
    pub async fn create_blank(pool: &PgPool) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO movies DEFAULT VALUES RETURNING id")
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE slug = $1 AND slug <> ''");
        sqlx::query_as::<_, Movie>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a movie with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List movies newest first. `pattern` is matched against the title.
    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE $1::TEXT IS NULL OR title ILIKE $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Movies featuring the given actor, newest first.
    pub async fn list_by_actor(pool: &PgPool, actor_id: DbId) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE $1 = ANY(actor_ids)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(actor_id)
            .fetch_all(pool)
            .await
    }

    /// Movies sharing at least one genre with `genre_ids`, newest first.
    pub async fn list_by_genres(
        pool: &PgPool,
        genre_ids: &[DbId],
    ) -> Result<Vec<Movie>, sqlx::Error> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE genre_ids && $1::BIGINT[]
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(genre_ids)
            .fetch_all(pool)
            .await
    }

    /// Movies whose id is in `ids`, newest first. Unknown ids are skipped.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Movie>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE id = ANY($1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Movies that have been opened at least once, most opened first.
    pub async fn most_popular(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE count_opened > 0
             ORDER BY count_opened DESC, id DESC"
        );
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Atomically bump the open counter of the movie with `slug`.
    ///
    /// Returns the updated row, or `None` if no movie has that slug.
    pub async fn increment_count_opened(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET count_opened = count_opened + 1
             WHERE slug = $1 AND slug <> ''
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Replace a movie's editable fields. `rating`, `count_opened` and
    /// `is_send_telegram` are left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieDto,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                poster = $2,
                big_poster = $3,
                title = $4,
                slug = $5,
                year = $6,
                duration = $7,
                country = $8,
                video_url = $9,
                genre_ids = $10,
                actor_ids = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.poster)
            .bind(&input.big_poster)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.parameters.year)
            .bind(input.parameters.duration)
            .bind(&input.parameters.country)
            .bind(&input.video_url)
            .bind(&input.genre_ids)
            .bind(&input.actor_ids)
            .fetch_optional(pool)
            .await
    }

    /// Claim the right to announce a movie by flipping `is_send_telegram`.
    ///
    /// Returns `true` for exactly one caller per movie; everyone else sees the
    /// flag already set.
    pub async fn claim_announcement(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET is_send_telegram = true WHERE id = $1 AND is_send_telegram = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Give a claim back after a failed delivery so the next save retries.
    pub async fn release_announcement(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE movies SET is_send_telegram = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Store a new average rating on a movie.
    ///
    /// Takes a connection so it can run inside the rating transaction.
    pub async fn update_rating(
        conn: &mut PgConnection,
        id: DbId,
        rating: f64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("UPDATE movies SET rating = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(rating)
            .fetch_optional(conn)
            .await
    }

    /// Delete a movie and remove it from every user's favorites. Ratings are
    /// removed by the foreign-key cascade.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM movies WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_some() {
            sqlx::query(
                "UPDATE users SET favorite_ids = array_remove(favorite_ids, $1)
                 WHERE $1 = ANY(favorite_ids)",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
