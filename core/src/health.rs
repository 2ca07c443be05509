//! Database liveness probe.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::QueryError;
use crate::sql::{decode_first, Row, Statement};

pub const PING: &str = "SELECT NOW() AS now";

#[derive(Deserialize)]
struct Ping {
    now: DateTime<Utc>,
}

pub fn build_ping() -> Statement {
    Statement::new(PING)
}

/// The store's current time.
pub fn parse_ping(rows: Vec<Row>) -> Result<DateTime<Utc>, QueryError> {
    let ping: Ping = decode_first(rows)?.ok_or(QueryError::NoRows)?;
    Ok(ping.now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_ping_reads_now_column() {
        let rows = vec![json!({ "now": "2024-05-01T12:30:00.250Z" })
            .as_object()
            .cloned()
            .unwrap()];
        let now = parse_ping(rows).unwrap();
        assert_eq!(now.timestamp_subsec_millis(), 250);
    }
}
