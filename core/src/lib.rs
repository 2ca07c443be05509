//! Pure SQL core for the todo and user CRUD service.
//!
//! # Overview
//! Builds parameterized `Statement` values and parses result rows without
//! touching a database (host-does-IO pattern). The server crate executes
//! the statements against its connection pool, so every piece of SQL the
//! service issues is deterministic and testable here.
//!
//! # Design
//! - Each endpoint is split into `build_*` (produces a statement) and
//!   `parse_*` (consumes rows), so the I/O boundary is explicit.
//! - Rows arrive as JSON objects keyed by column name and are decoded into
//!   DTOs with serde.
//! - Partial updates draw their columns from a closed allow-list.

pub mod error;
pub mod health;
pub mod sql;
pub mod todos;
pub mod types;
pub mod users;

pub use error::QueryError;
pub use sql::{Row, SqlValue, Statement};
pub use types::{CreateTodo, CreateUser, DeletedTodo, Todo, UpdateTodo, User};
