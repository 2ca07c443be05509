use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_server::{Config, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .init();

    let store = PgStore::connect_lazy(&config);
    let now = todo_server::startup_check(&store, config.startup_timeout())
        .await
        .with_context(|| {
            format!(
                "database {}:{}/{} is unreachable",
                config.db_host, config.db_port, config.db_database
            )
        })?;
    tracing::info!(database_time = %now, "connected to PostgreSQL");

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    todo_server::run(listener, Arc::new(store.clone())).await?;

    store.close().await;
    tracing::info!("server shutdown complete");
    Ok(())
}
