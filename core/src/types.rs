//! Domain DTOs for the todo and user endpoints.
//!
//! # Design
//! Entity types (`Todo`, `User`) are decoded from store rows and serialized
//! straight into response bodies. Request payloads keep every field optional
//! so that a missing field is a validation failure with a precise message
//! rather than a generic decoder error; a JSON `null` reads as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
}

/// A user row. `created_at` is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /todos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    pub description: Option<String>,
}

/// Request payload for `PUT /todos/{id}`. Only the fields present in the
/// JSON are written; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.completed.is_none()
    }
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Response body for `DELETE /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedTodo {
    pub message: String,
    #[serde(rename = "deletedTodo")]
    pub deleted_todo: Todo,
}
