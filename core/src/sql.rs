//! Parameterized SQL described as plain data.
//!
//! # Design
//! Builders in this crate produce `Statement` values and parsers consume
//! `Row` values without ever touching a database. The server crate owns the
//! connection pool and executes statements on the builders' behalf, so every
//! piece of SQL text lives here where it can be asserted on exactly.
//!
//! Values are owned (`String`, `Vec`) so a statement can be handed to an
//! async executor without lifetime concerns.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A value bound to a positional `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

/// SQL text plus the values for its placeholders, in placeholder order.
///
/// `params[0]` binds `$1`, `params[1]` binds `$2`, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// One result row keyed by column name.
pub type Row = Map<String, Value>;

/// Decode a row into a typed DTO. Columns the DTO does not name are ignored.
pub fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}

pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter().map(decode_row).collect()
}

/// Decode the first row, if any. Statements here return at most one row
/// when they target a single id.
pub(crate) fn decode_first<T: DeserializeOwned>(
    rows: Vec<Row>,
) -> Result<Option<T>, serde_json::Error> {
    rows.into_iter().next().map(decode_row).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_appends_in_placeholder_order() {
        let stmt = Statement::new("SELECT $1, $2, $3")
            .bind(7_i64)
            .bind("text")
            .bind(false);
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::Int(7),
                SqlValue::Text("text".to_string()),
                SqlValue::Bool(false),
            ]
        );
    }

    #[test]
    fn sql_values_serialize_untagged() {
        let json = serde_json::to_value(vec![
            SqlValue::Int(1),
            SqlValue::Text("a".to_string()),
            SqlValue::Bool(true),
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([1, "a", true]));
    }

    #[test]
    fn decode_first_of_empty_is_none() {
        let decoded: Option<serde_json::Value> = decode_first(Vec::new()).unwrap();
        assert!(decoded.is_none());
    }
}
