//! Repository for the `actors` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, ActorDto, ActorWithCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, photo, created_at, updated_at";

/// Provides CRUD operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a blank actor (all text fields empty) and return its id.
    ///
    /// The admin UI creates a draft first and fills it in with `update`.
    pub async fn create_blank(pool: &PgPool) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO actors DEFAULT VALUES RETURNING id")
            .fetch_one(pool)
            .await
    }

    /// Find an actor by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an actor by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE slug = $1 AND slug <> ''");
        sqlx::query_as::<_, Actor>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every actor whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Actor>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = ANY($1) ORDER BY name");
        sqlx::query_as::<_, Actor>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List actors newest first with their movie counts.
    ///
    /// `pattern` is an `ILIKE` pattern matched against name and slug.
    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
    ) -> Result<Vec<ActorWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ActorWithCount>(
            "SELECT a.id, a.name, a.slug, a.photo, a.created_at, a.updated_at,
                    (SELECT COUNT(*) FROM movies m WHERE a.id = ANY(m.actor_ids)) AS count_movies
             FROM actors a
             WHERE $1::TEXT IS NULL OR a.name ILIKE $1 OR a.slug ILIKE $1
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    /// Replace an actor's fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ActorDto,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!(
            "UPDATE actors SET name = $2, slug = $3, photo = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }

    /// Delete an actor and drop it from every movie's cast.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM actors WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_some() {
            sqlx::query(
                "UPDATE movies SET actor_ids = array_remove(actor_ids, $1)
                 WHERE $1 = ANY(actor_ids)",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
