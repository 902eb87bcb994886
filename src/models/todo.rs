use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Priority of a todo item.
/// Corresponds to the `todo_priority` SQL enum; the wire casing matches the
/// variant names exactly ("Low", "Medium", "High").
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_priority")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Completion state of a todo item.
/// Corresponds to the `todo_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_status")]
pub enum TodoStatus {
    Incomplete,
    Complete,
}

/// A todo item as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Identifier assigned by the store (serial, unique within the table).
    pub id: i32,
    /// Identifier of the owning user. Every read/update/delete is scoped by it.
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TodoStatus,
    /// Set once at creation, UTC wall clock without a timezone.
    pub created_at: NaiveDateTime,
}

/// Input structure for creating a todo.
///
/// Title emptiness is deliberately not enforced here: the HTTP contract
/// accepts whatever title the caller sends, and only the tool adapters gate
/// their own argument schemas.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

/// Partial update for `PATCH /todos/{id}`. Fields left out of the request
/// body stay unchanged; there is no way to null out a description through
/// this type.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,
}

impl Todo {
    /// Applies a partial patch, touching only the supplied fields.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
