//! In-memory `Store` doubles for driving the router without PostgreSQL.
//!
//! `MemoryStore` understands exactly the statements `todo_core` builds and
//! applies them to plain collections. Every call is counted so tests can
//! assert that rejected requests never reached the store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use serde::Serialize;
use todo_core::{health, todos, users, Row, SqlValue, Statement, Todo, User};
use todo_server::{SharedStore, Store, StoreError};

#[derive(Default)]
struct Tables {
    todos: BTreeMap<i64, Todo>,
    users: Vec<User>,
    last_todo_id: i64,
    last_user_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    /// Insert a todo with a chosen id, bypassing the API.
    pub fn seed_todo(&self, id: i64, description: &str) {
        let mut tables = self.tables.lock().unwrap();
        tables.todos.insert(
            id,
            Todo {
                id,
                description: description.to_string(),
                completed: false,
            },
        );
        tables.last_todo_id = tables.last_todo_id.max(id);
    }
}

pub fn as_shared(store: &Arc<MemoryStore>) -> SharedStore {
    store.clone()
}

fn to_row<T: Serialize>(value: &T) -> Row {
    serde_json::to_value(value)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap()
}

fn int(value: &SqlValue) -> i64 {
    match value {
        SqlValue::Int(v) => *v,
        other => panic!("expected integer param, got {other:?}"),
    }
}

fn text(value: &SqlValue) -> String {
    match value {
        SqlValue::Text(v) => v.clone(),
        other => panic!("expected text param, got {other:?}"),
    }
}

/// Apply `UPDATE todos SET col = $n, ... WHERE id = $m RETURNING *`.
fn apply_update(tables: &mut Tables, statement: &Statement) -> Vec<Row> {
    let sql = &statement.sql;
    let params = &statement.params;
    let set_clause = sql
        .strip_prefix("UPDATE todos SET ")
        .and_then(|rest| rest.split(" WHERE id = $").next())
        .unwrap();
    let id_placeholder: usize = sql
        .split(" WHERE id = $")
        .nth(1)
        .and_then(|rest| rest.strip_suffix(" RETURNING *"))
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(id_placeholder, params.len(), "id must take the last placeholder");

    let Some(todo) = tables.todos.get_mut(&int(&params[id_placeholder - 1])) else {
        return Vec::new();
    };
    for fragment in set_clause.split(", ") {
        let (column, placeholder) = fragment.split_once(" = $").unwrap();
        let value = &params[placeholder.parse::<usize>().unwrap() - 1];
        match (column, value) {
            ("description", SqlValue::Text(v)) => todo.description = v.clone(),
            ("completed", SqlValue::Bool(v)) => todo.completed = *v,
            other => panic!("unexpected assignment {other:?}"),
        }
    }
    vec![to_row(&*todo)]
}

#[async_trait]
impl Store for MemoryStore {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        let params = &statement.params;

        let rows = match statement.sql.as_str() {
            todos::SELECT_ALL => tables.todos.values().map(to_row).collect(),
            todos::SELECT_BY_ID => tables
                .todos
                .get(&int(&params[0]))
                .map(to_row)
                .into_iter()
                .collect(),
            todos::INSERT => {
                tables.last_todo_id += 1;
                let todo = Todo {
                    id: tables.last_todo_id,
                    description: text(&params[0]),
                    completed: false,
                };
                let row = to_row(&todo);
                tables.todos.insert(todo.id, todo);
                vec![row]
            }
            todos::DELETE_BY_ID => tables
                .todos
                .remove(&int(&params[0]))
                .map(|todo| to_row(&todo))
                .into_iter()
                .collect(),
            sql if sql.starts_with("UPDATE todos SET ") => apply_update(&mut tables, statement),
            users::SELECT_ALL => tables.users.iter().map(to_row).collect(),
            users::INSERT => {
                tables.last_user_id += 1;
                let user = User {
                    id: tables.last_user_id,
                    name: text(&params[0]),
                    email: text(&params[1]),
                    created_at: Utc::now().trunc_subsecs(3),
                };
                let row = to_row(&user);
                tables.users.push(user);
                vec![row]
            }
            health::PING => vec![to_row(&serde_json::json!({ "now": Utc::now() }))],
            other => panic!("unexpected statement: {other}"),
        };
        Ok(rows)
    }
}

/// A store whose every call fails the way an exhausted pool does.
#[derive(Default)]
pub struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn execute(&self, _statement: &Statement) -> Result<Vec<Row>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}
