//! Repository for the `users` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::RatingRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, is_admin, favorite_ids, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, is_admin)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive; emails are lowercased on write).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users newest first. `pattern` is matched against the email.
    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE $1::TEXT IS NULL OR email ILIKE $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Total number of users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                is_admin = COALESCE($4, is_admin)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_optional(pool)
            .await
    }

    /// Add the movie to the user's favorites, or remove it if already there.
    ///
    /// Returns the resulting favorite list, or `None` if the user is gone.
    pub async fn toggle_favorite(
        pool: &PgPool,
        id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Vec<DbId>>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET favorite_ids = CASE
                 WHEN $2 = ANY(favorite_ids) THEN array_remove(favorite_ids, $2)
                 ELSE array_append(favorite_ids, $2)
             END
             WHERE id = $1
             RETURNING favorite_ids",
        )
        .bind(id)
        .bind(movie_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a user by ID, returning the deleted row.
    ///
    /// The user's ratings go with it through the foreign-key cascade, so the
    /// movies they rated are locked first (same lock `set_rating` takes) and
    /// get their averages recomputed before commit.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let rated: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM movies
             WHERE id IN (SELECT movie_id FROM ratings WHERE user_id = $1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_some() && !rated.is_empty() {
            let updated = RatingRepo::recompute_averages(&mut *tx, &rated).await?;
            tracing::debug!(user_id = id, movies = updated, "Ratings of deleted user removed");
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
