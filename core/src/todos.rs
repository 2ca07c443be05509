//! Statement builders and row parsers for the `todos` table.
//!
//! # Design
//! Each endpoint is split into a `build_*` function that produces a
//! `Statement` and a `parse_*` function that consumes the returned rows. The
//! caller executes the statement in between, keeping this module
//! deterministic and free of I/O.
//!
//! Partial updates assemble their `SET` clause from `TodoColumn`, a closed
//! allow-list. Caller input decides which columns appear, never what they
//! are called.

use crate::error::QueryError;
use crate::sql::{decode_first, decode_rows, Row, SqlValue, Statement};
use crate::types::{CreateTodo, DeletedTodo, Todo, UpdateTodo};

pub const SELECT_ALL: &str = "SELECT * FROM todos ORDER BY id ASC";
pub const SELECT_BY_ID: &str = "SELECT * FROM todos WHERE id = $1";
pub const INSERT: &str = "INSERT INTO todos (description) VALUES ($1) RETURNING *";
pub const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = $1 RETURNING *";

pub const NOT_FOUND: &str = "Todo not found";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const NO_UPDATE_FIELDS: &str = "No update fields provided (description or completed)";
pub const DELETED: &str = "Todo deleted successfully";

/// Columns a partial update may assign, in the order they appear in the
/// generated `SET` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoColumn {
    Description,
    Completed,
}

impl TodoColumn {
    pub const fn as_str(self) -> &'static str {
        match self {
            TodoColumn::Description => "description",
            TodoColumn::Completed => "completed",
        }
    }
}

/// Accumulates `column = $n` fragments alongside their values.
///
/// The next placeholder index is always one past the number of values bound
/// so far, so fragments and params cannot drift apart.
struct Assignments {
    fragments: Vec<String>,
    params: Vec<SqlValue>,
}

impl Assignments {
    fn new() -> Self {
        Self {
            fragments: Vec::new(),
            params: Vec::new(),
        }
    }

    fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    fn set(&mut self, column: TodoColumn, value: impl Into<SqlValue>) {
        let n = self.next_placeholder();
        self.fragments.push(format!("{} = ${n}", column.as_str()));
        self.params.push(value.into());
    }

    /// Bind `id` to the highest placeholder and render the statement.
    fn finish(mut self, id: i64) -> Statement {
        let n = self.next_placeholder();
        self.params.push(SqlValue::Int(id));
        Statement {
            sql: format!(
                "UPDATE todos SET {} WHERE id = ${n} RETURNING *",
                self.fragments.join(", ")
            ),
            params: self.params,
        }
    }
}

pub fn build_list_todos() -> Statement {
    Statement::new(SELECT_ALL)
}

pub fn build_get_todo(id: i64) -> Statement {
    Statement::new(SELECT_BY_ID).bind(id)
}

/// Rejects a missing, null, or empty `description`.
pub fn build_create_todo(input: &CreateTodo) -> Result<Statement, QueryError> {
    let description = input
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or(QueryError::Validation(DESCRIPTION_REQUIRED))?;
    Ok(Statement::new(INSERT).bind(description))
}

/// Build `UPDATE todos SET ... WHERE id = $n RETURNING *` from the fields
/// present in `input`.
///
/// Presence decides inclusion, not truthiness: `completed: false` and an
/// empty `description` are both written. An input with no fields is
/// rejected before anything is assembled.
pub fn build_update_todo(id: i64, input: &UpdateTodo) -> Result<Statement, QueryError> {
    if input.is_empty() {
        return Err(QueryError::Validation(NO_UPDATE_FIELDS));
    }

    let mut assignments = Assignments::new();
    if let Some(description) = &input.description {
        assignments.set(TodoColumn::Description, description.as_str());
    }
    if let Some(completed) = input.completed {
        assignments.set(TodoColumn::Completed, completed);
    }
    Ok(assignments.finish(id))
}

pub fn build_delete_todo(id: i64) -> Statement {
    Statement::new(DELETE_BY_ID).bind(id)
}

pub fn parse_list_todos(rows: Vec<Row>) -> Result<Vec<Todo>, QueryError> {
    Ok(decode_rows(rows)?)
}

/// Parse the single row returned by a get or update. No row means the id
/// does not exist.
pub fn parse_todo(rows: Vec<Row>) -> Result<Todo, QueryError> {
    decode_first(rows)?.ok_or(QueryError::NotFound(NOT_FOUND))
}

pub fn parse_created_todo(rows: Vec<Row>) -> Result<Todo, QueryError> {
    decode_first(rows)?.ok_or(QueryError::NoRows)
}

pub fn parse_deleted_todo(rows: Vec<Row>) -> Result<DeletedTodo, QueryError> {
    let deleted_todo = parse_todo(rows)?;
    Ok(DeletedTodo {
        message: DELETED.to_string(),
        deleted_todo,
    })
}
