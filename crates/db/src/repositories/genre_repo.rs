//! Repository for the `genres` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{Collection, Genre, GenreDto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, icon, created_at, updated_at";

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Insert a blank genre and return its id.
    pub async fn create_blank(pool: &PgPool) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO genres DEFAULT VALUES RETURNING id")
            .fetch_one(pool)
            .await
    }

    /// Find a genre by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a genre by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE slug = $1 AND slug <> ''");
        sqlx::query_as::<_, Genre>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every genre whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Genre>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = ANY($1) ORDER BY name");
        sqlx::query_as::<_, Genre>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List genres newest first. `pattern` matches name, slug or description.
    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM genres
             WHERE $1::TEXT IS NULL OR name ILIKE $1 OR slug ILIKE $1 OR description ILIKE $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Genre collections: each genre that has movies, illustrated with the
    /// big poster of its newest movie. Genres without movies are omitted.
    pub async fn collections(pool: &PgPool) -> Result<Vec<Collection>, sqlx::Error> {
        sqlx::query_as::<_, Collection>(
            "SELECT g.id, g.name AS title, g.slug, m.big_poster AS image
             FROM genres g
             JOIN LATERAL (
                 SELECT big_poster FROM movies
                 WHERE g.id = ANY(genre_ids)
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) m ON true
             ORDER BY g.created_at DESC, g.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace a genre's fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &GenreDto,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET name = $2, slug = $3, description = $4, icon = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a genre and drop it from every movie.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM genres WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_some() {
            sqlx::query(
                "UPDATE movies SET genre_ids = array_remove(genre_ids, $1)
                 WHERE $1 = ANY(genre_ids)",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
