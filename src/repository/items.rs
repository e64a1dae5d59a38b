//! Ownership-scoped item operations.
//!
//! Reads, updates and deletes go through the three-way join
//! `todo_items ⋈ lists_items ⋈ users_lists`, so an item is only reachable by users who
//! own the list it belongs to.

use sqlx::PgPool;

use super::lists::ensure_owned;
use super::update::item_update;
use crate::error::AppError;
use crate::models::{ItemInput, TodoItem, UpdateItemInput};

const ITEM_NOT_FOUND: &str = "item not found";

/// Creates the item and its list membership row in one transaction.
///
/// If the membership insert fails the item insert is rolled back with it. A list that
/// no longer exists (deleted after the caller's ownership check) yields `NotFound`.
/// Callers must check list ownership beforehand.
pub async fn create_item(pool: &PgPool, list_id: i32, input: &ItemInput) -> Result<i32, AppError> {
    // Dropping `tx` on an early return rolls the whole operation back.
    let mut tx = pool.begin().await?;

    let item_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO todo_items (title, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(&input.title)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES ($1, $2)")
        .bind(list_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound("list not found".into())
            }
            other => other.into(),
        })?;

    tx.commit().await?;
    Ok(item_id)
}

/// Items of an owned list. An owned list without items yields an empty vector;
/// a list the user cannot see yields `NotFound`.
pub async fn get_items(
    pool: &PgPool,
    user_id: i32,
    list_id: i32,
) -> Result<Vec<TodoItem>, AppError> {
    ensure_owned(pool, user_id, list_id).await?;

    let items = sqlx::query_as::<_, TodoItem>(
        "SELECT ti.id, ti.title, ti.description, ti.done FROM todo_items ti \
         INNER JOIN lists_items li ON li.item_id = ti.id \
         INNER JOIN users_lists ul ON ul.list_id = li.list_id \
         WHERE li.list_id = $1 AND ul.user_id = $2 ORDER BY ti.id",
    )
    .bind(list_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get_item(pool: &PgPool, user_id: i32, item_id: i32) -> Result<TodoItem, AppError> {
    sqlx::query_as::<_, TodoItem>(
        "SELECT ti.id, ti.title, ti.description, ti.done FROM todo_items ti \
         INNER JOIN lists_items li ON li.item_id = ti.id \
         INNER JOIN users_lists ul ON ul.list_id = li.list_id \
         WHERE ti.id = $1 AND ul.user_id = $2",
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
}

pub async fn update_item(
    pool: &PgPool,
    user_id: i32,
    item_id: i32,
    input: UpdateItemInput,
) -> Result<(), AppError> {
    item_update(input, item_id, user_id)?
        .execute(pool, ITEM_NOT_FOUND)
        .await
}

pub async fn delete_item(pool: &PgPool, user_id: i32, item_id: i32) -> Result<(), AppError> {
    let result = sqlx::query(
        "DELETE FROM todo_items ti USING lists_items li, users_lists ul \
         WHERE ti.id = li.item_id AND li.list_id = ul.list_id \
         AND ti.id = $1 AND ul.user_id = $2",
    )
    .bind(item_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(ITEM_NOT_FOUND.into()));
    }
    Ok(())
}
