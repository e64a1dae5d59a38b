use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Inserts a user, reporting `Conflict` when the username is already taken.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (name, username, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("username already exists".into())
        }
        other => other.into(),
    })
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
