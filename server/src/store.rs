//! The store seam: executes a `Statement` and returns its rows.
//!
//! Handlers only see `dyn Store`, so tests swap in an in-memory double.
//! `PgStore` runs each statement on a pooled connection that is returned to
//! the pool when the call finishes, on the error path too.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use thiserror::Error;
use todo_core::{Row, SqlValue, Statement};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("column `{column}` has unsupported type {type_name}")]
    UnsupportedType { column: String, type_name: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError>;
}

pub type SharedStore = Arc<dyn Store>;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool without opening a connection. The first statement
    /// executed is the first connection attempt.
    pub fn connect_lazy(config: &Config) -> Self {
        Self::new(
            config
                .pool_options()
                .connect_lazy_with(config.connect_options()),
        )
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for PgStore {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError> {
        let mut query = sqlx::query::<Postgres>(&statement.sql);
        for param in &statement.params {
            query = match param {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
                SqlValue::Bool(v) => query.bind(*v),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        tracing::debug!(sql = %statement.sql, rows = rows.len(), "statement executed");
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    let mut object = Row::new();
    for column in row.columns() {
        let value = decode_column(row, column)?;
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<Value, StoreError> {
    let i = column.ordinal();
    let type_name = column.type_info().name();
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(i)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(i)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(i)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(i)?.map(Value::from),
        "FLOAT4" => row.try_get::<Option<f32>, _>(i)?.map(|v| Value::from(f64::from(v))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(i)?.map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(i)?.map(Value::from)
        }
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(i)?
            .map(timestamp_value),
        // Naive timestamps are stored as UTC.
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(i)?
            .map(|ts| timestamp_value(ts.and_utc())),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(i)?
            .map(|d| Value::from(d.to_string())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(i)?,
        other => {
            return Err(StoreError::UnsupportedType {
                column: column.name().to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

fn timestamp_value(ts: DateTime<Utc>) -> Value {
    Value::from(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
