use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A todo list as stored in `todo_lists`. Visibility is governed by `users_lists`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// A todo item as stored in `todo_items`. Belongs to exactly one list via `lists_items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Input for creating a list.
#[derive(Debug, Deserialize, Validate)]
pub struct ListInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
}

/// Input for creating an item. New items always start with `done = false`.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
}

/// Sparse list update: absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateListInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Sparse item update: absent fields are left unchanged, an empty string is a real value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateItemInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_input_validation() {
        let input: ListInput = serde_json::from_str(r#"{"title": "L"}"#).unwrap();
        assert_eq!(input.description, "");
        assert!(input.validate().is_ok());

        let input = ListInput {
            title: "".to_string(),
            description: "d".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_item_input_validation() {
        let input = ItemInput {
            title: "a".repeat(256),
            description: "d".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_item_input_distinguishes_absent_from_empty() {
        let input: UpdateItemInput =
            serde_json::from_str(r#"{"description": "", "done": true}"#).unwrap();
        assert_eq!(input.title, None);
        assert_eq!(input.description.as_deref(), Some(""));
        assert_eq!(input.done, Some(true));
        assert!(input.validate().is_ok());
    }
}
