//! Process configuration.
//!
//! Every option is a command-line flag that falls back to an environment
//! variable, so a `.env` file loaded at startup is enough to run the server.
//! Database settings are not checked here; bad values show up as a failed
//! startup health check.

use std::fmt;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

#[derive(Clone, Parser)]
#[command(
    name = "todo-server",
    version,
    about = "JSON CRUD API for todos and users backed by PostgreSQL"
)]
pub struct Config {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_DATABASE", default_value = "postgres")]
    pub db_database: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 20)]
    pub db_max_connections: u32,

    /// Seconds an idle pooled connection is kept open
    #[arg(long, env = "DB_IDLE_TIMEOUT_SECS", default_value_t = 30)]
    pub db_idle_timeout_secs: u64,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 2)]
    pub db_acquire_timeout_secs: u64,

    /// Seconds the startup health check may take
    #[arg(long, env = "STARTUP_TIMEOUT_SECS", default_value_t = 5)]
    pub startup_timeout_secs: u64,
}

impl Config {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_database)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .idle_timeout(Duration::from_secs(self.db_idle_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_database", &self.db_database)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_idle_timeout_secs", &self.db_idle_timeout_secs)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("startup_timeout_secs", &self.startup_timeout_secs)
            .finish()
    }
}
