//! Ownership-scoped list operations.
//!
//! Every query joins `users_lists` on the caller's id, so a list that exists but is
//! owned by someone else is indistinguishable from one that does not exist.

use sqlx::PgPool;

use super::update::list_update;
use crate::error::AppError;
use crate::models::{ListInput, TodoList, UpdateListInput};

const LIST_NOT_FOUND: &str = "list not found";

/// Creates the list and its ownership row in one transaction.
pub async fn create_list(pool: &PgPool, user_id: i32, input: &ListInput) -> Result<i32, AppError> {
    // Dropping `tx` on an early return rolls the whole operation back.
    let mut tx = pool.begin().await?;

    let list_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO todo_lists (title, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(&input.title)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    log::debug!("user {} created list {}", user_id, list_id);
    Ok(list_id)
}

pub async fn get_lists(pool: &PgPool, user_id: i32) -> Result<Vec<TodoList>, AppError> {
    let lists = sqlx::query_as::<_, TodoList>(
        "SELECT tl.id, tl.title, tl.description FROM todo_lists tl \
         INNER JOIN users_lists ul ON tl.id = ul.list_id \
         WHERE ul.user_id = $1 ORDER BY tl.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lists)
}

pub async fn get_list(pool: &PgPool, user_id: i32, list_id: i32) -> Result<TodoList, AppError> {
    sqlx::query_as::<_, TodoList>(
        "SELECT tl.id, tl.title, tl.description FROM todo_lists tl \
         INNER JOIN users_lists ul ON tl.id = ul.list_id \
         WHERE ul.user_id = $1 AND ul.list_id = $2",
    )
    .bind(user_id)
    .bind(list_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(LIST_NOT_FOUND.into()))
}

/// Fails with `NotFound` unless `user_id` owns `list_id`.
pub async fn ensure_owned(pool: &PgPool, user_id: i32, list_id: i32) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>(
        "SELECT list_id FROM users_lists WHERE user_id = $1 AND list_id = $2",
    )
    .bind(user_id)
    .bind(list_id)
    .fetch_optional(pool)
    .await?
    .map(|_| ())
    .ok_or_else(|| AppError::NotFound(LIST_NOT_FOUND.into()))
}

pub async fn update_list(
    pool: &PgPool,
    user_id: i32,
    list_id: i32,
    input: UpdateListInput,
) -> Result<(), AppError> {
    list_update(input, list_id, user_id)?
        .execute(pool, LIST_NOT_FOUND)
        .await
}

/// Deletes an owned list together with its items. Mapping rows go with them by cascade.
pub async fn delete_list(pool: &PgPool, user_id: i32, list_id: i32) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM todo_items ti USING lists_items li, users_lists ul \
         WHERE ti.id = li.item_id AND li.list_id = ul.list_id \
         AND ul.list_id = $1 AND ul.user_id = $2",
    )
    .bind(list_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let deleted = sqlx::query(
        "DELETE FROM todo_lists tl USING users_lists ul \
         WHERE tl.id = ul.list_id AND ul.list_id = $1 AND ul.user_id = $2",
    )
    .bind(list_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(LIST_NOT_FOUND.into()));
    }

    tx.commit().await?;
    Ok(())
}
