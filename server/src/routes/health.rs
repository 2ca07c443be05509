//! Health check endpoint and the startup connectivity probe.

use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use todo_core::health;

use crate::error::ApiError;
use crate::store::{SharedStore, Store, StoreError};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database_time: DateTime<Utc>,
}

pub fn router() -> Router<SharedStore> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check(State(store): State<SharedStore>) -> Result<Json<HealthResponse>, ApiError> {
    let database_time = database_time(store.as_ref()).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        database_time,
    }))
}

/// Ask the store for its current time.
pub async fn database_time(store: &dyn Store) -> Result<DateTime<Utc>, ApiError> {
    let rows = store.execute(&health::build_ping()).await?;
    Ok(health::parse_ping(rows)?)
}

/// `database_time` bounded by `limit`. Used once before the server binds.
pub async fn startup_check(store: &dyn Store, limit: Duration) -> Result<DateTime<Utc>, ApiError> {
    tokio::time::timeout(limit, database_time(store))
        .await
        .map_err(|_| ApiError::Database(StoreError::Timeout(limit)))?
}
