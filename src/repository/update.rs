//! Partial-update statement builder.
//!
//! Only the fields a caller actually supplied become `column = $n` assignments, in a
//! fixed declaration order. The ownership predicate arguments are always bound last,
//! and the predicate re-derives the ownership join so an update aimed at someone
//! else's row matches zero rows.

use sqlx::{PgPool, Postgres};

use crate::error::AppError;
use crate::models::{UpdateItemInput, UpdateListInput};

pub const EMPTY_UPDATE: &str = "update structure has no values";

/// A positional argument for a dynamically built statement.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Bool(bool),
    Int(i32),
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        BindValue::Bool(value)
    }
}

impl From<i32> for BindValue {
    fn from(value: i32) -> Self {
        BindValue::Int(value)
    }
}

/// Accumulates `SET` assignments and their arguments.
#[derive(Debug, Default)]
pub struct SetClause {
    assignments: Vec<String>,
    args: Vec<BindValue>,
}

impl SetClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = $n` when `value` is present; absent values are skipped entirely.
    pub fn set<V: Into<BindValue>>(mut self, column: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.args.push(value.into());
            self.assignments
                .push(format!("{} = ${}", column, self.args.len()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finishes the statement. `render` receives the joined assignments and the
    /// placeholder numbers of the two predicate arguments.
    fn finish<F>(self, predicate: [i32; 2], render: F) -> Result<UpdateQuery, AppError>
    where
        F: FnOnce(&str, usize, usize) -> String,
    {
        if self.is_empty() {
            return Err(AppError::BadRequest(EMPTY_UPDATE.into()));
        }

        let first = self.args.len() + 1;
        let sql = render(&self.assignments.join(", "), first, first + 1);
        let mut args = self.args;
        args.extend(predicate.into_iter().map(BindValue::Int));

        Ok(UpdateQuery { sql, args })
    }
}

/// A ready-to-run `UPDATE` statement with its ordered arguments.
#[derive(Debug, PartialEq)]
pub struct UpdateQuery {
    pub sql: String,
    pub args: Vec<BindValue>,
}

impl UpdateQuery {
    /// Executes the statement, reporting `NotFound` when no owned row matched.
    pub async fn execute(&self, pool: &PgPool, not_found: &str) -> Result<(), AppError> {
        let mut query = sqlx::query::<Postgres>(&self.sql);
        for arg in &self.args {
            query = match arg {
                BindValue::Text(value) => query.bind(value.as_str()),
                BindValue::Bool(value) => query.bind(*value),
                BindValue::Int(value) => query.bind(*value),
            };
        }

        let result = query.execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(not_found.into()));
        }
        Ok(())
    }
}

/// Builds the item update; predicate arguments are `(item_id, user_id)`.
pub fn item_update(
    input: UpdateItemInput,
    item_id: i32,
    user_id: i32,
) -> Result<UpdateQuery, AppError> {
    SetClause::new()
        .set("title", input.title)
        .set("description", input.description)
        .set("done", input.done)
        .finish([item_id, user_id], |assignments, item, user| {
            format!(
                "UPDATE todo_items ti SET {} FROM lists_items li, users_lists ul \
                 WHERE ti.id = li.item_id AND li.list_id = ul.list_id \
                 AND ti.id = ${} AND ul.user_id = ${}",
                assignments, item, user
            )
        })
}

/// Builds the list update; predicate arguments are `(list_id, user_id)`.
pub fn list_update(
    input: UpdateListInput,
    list_id: i32,
    user_id: i32,
) -> Result<UpdateQuery, AppError> {
    SetClause::new()
        .set("title", input.title)
        .set("description", input.description)
        .finish([list_id, user_id], |assignments, list, user| {
            format!(
                "UPDATE todo_lists tl SET {} FROM users_lists ul \
                 WHERE tl.id = ul.list_id AND ul.list_id = ${} AND ul.user_id = ${}",
                assignments, list, user
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set_clause(sql: &str) -> &str {
        let start = sql.find(" SET ").unwrap() + " SET ".len();
        let end = sql.find(" FROM ").unwrap();
        &sql[start..end]
    }

    #[test]
    fn test_item_update_all_fields() {
        let input = UpdateItemInput {
            title: Some("new title".into()),
            description: Some("new description".into()),
            done: Some(true),
        };
        let query = item_update(input, 10, 20).unwrap();

        assert_eq!(
            set_clause(&query.sql),
            "title = $1, description = $2, done = $3"
        );
        assert!(query.sql.ends_with("AND ti.id = $4 AND ul.user_id = $5"));
        assert_eq!(
            query.args,
            vec![
                BindValue::Text("new title".into()),
                BindValue::Text("new description".into()),
                BindValue::Bool(true),
                BindValue::Int(10),
                BindValue::Int(20),
            ]
        );
    }

    #[test]
    fn test_item_update_skips_absent_fields() {
        let input = UpdateItemInput {
            title: Some("new title".into()),
            description: None,
            done: Some(false),
        };
        let query = item_update(input, 3, 4).unwrap();

        assert_eq!(set_clause(&query.sql), "title = $1, done = $2");
        assert!(query.sql.ends_with("AND ti.id = $3 AND ul.user_id = $4"));
        assert_eq!(
            query.args,
            vec![
                BindValue::Text("new title".into()),
                BindValue::Bool(false),
                BindValue::Int(3),
                BindValue::Int(4),
            ]
        );
    }

    #[test]
    fn test_item_update_only_done() {
        let input = UpdateItemInput {
            done: Some(true),
            ..Default::default()
        };
        let query = item_update(input, 1, 1).unwrap();

        assert_eq!(set_clause(&query.sql), "done = $1");
        assert_eq!(&query.args[1..], &[BindValue::Int(1), BindValue::Int(1)]);
    }

    #[test]
    fn test_item_update_keeps_empty_string() {
        let input = UpdateItemInput {
            description: Some(String::new()),
            ..Default::default()
        };
        let query = item_update(input, 1, 2).unwrap();

        assert_eq!(set_clause(&query.sql), "description = $1");
        assert_eq!(query.args[0], BindValue::Text(String::new()));
    }

    #[test]
    fn test_item_update_without_fields_is_rejected() {
        match item_update(UpdateItemInput::default(), 1, 1) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, EMPTY_UPDATE),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_list_update() {
        let input = UpdateListInput {
            title: None,
            description: Some("d".into()),
        };
        let query = list_update(input, 5, 6).unwrap();

        assert_eq!(set_clause(&query.sql), "description = $1");
        assert!(query
            .sql
            .ends_with("AND ul.list_id = $2 AND ul.user_id = $3"));
        assert_eq!(
            query.args,
            vec![
                BindValue::Text("d".into()),
                BindValue::Int(5),
                BindValue::Int(6)
            ]
        );

        assert!(list_update(UpdateListInput::default(), 5, 6).is_err());
    }
}
