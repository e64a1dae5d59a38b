//! Credential store: account creation and login verification.
//!
//! bcrypt work runs on the blocking thread pool so it does not stall the
//! request workers.

use sqlx::PgPool;

use super::password::Passwords;
use crate::error::AppError;
use crate::repository::users;

const INVALID_CREDENTIALS: &str = "invalid username or password";

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("password task failed: {}", e)))?
}

/// Registers a user and returns the new id. Only the bcrypt hash is stored.
pub async fn register(
    pool: &PgPool,
    passwords: &Passwords,
    username: &str,
    name: &str,
    password: &str,
) -> Result<i32, AppError> {
    let hasher = passwords.clone();
    let password = password.to_owned();
    let password_hash = run_blocking(move || hasher.hash(&password)).await?;

    let id = users::create_user(pool, username, name, &password_hash).await?;
    log::info!("registered user {}", id);
    Ok(id)
}

/// Resolves a username/password pair to a user id.
///
/// An unknown username and a wrong password produce the same error after the same
/// amount of bcrypt work.
pub async fn verify_credentials(
    pool: &PgPool,
    passwords: &Passwords,
    username: &str,
    password: &str,
) -> Result<i32, AppError> {
    let user = users::find_by_username(pool, username).await?;

    let verifier = passwords.clone();
    let password = password.to_owned();
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let matched = run_blocking(move || verifier.verify(&password, stored.as_deref())).await?;

    match user {
        Some(user) if matched => Ok(user.id),
        _ => Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    }
}
