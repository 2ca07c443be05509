//! JSON CRUD API for todos and users backed by PostgreSQL.
//!
//! # Overview
//! axum routes turn requests into `todo_core` statements, hand them to a
//! [`Store`], and map the returned rows or errors onto HTTP responses. The
//! store is injected as router state, so tests run the full router against
//! an in-memory double.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod store;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use routes::health::startup_check;
pub use store::{PgStore, SharedStore, Store, StoreError};

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .merge(routes::users::router())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve until Ctrl+C or SIGTERM, then drain in-flight requests.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}
