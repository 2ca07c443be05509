//! Errors raised while building statements or decoding their rows.
//!
//! # Design
//! `Validation` and `NotFound` carry the exact client-facing message so the
//! server can forward it verbatim. `MalformedRow` and `NoRows` mean the store
//! returned something the builders did not ask for; the server reports those
//! as internal errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A required field is absent or an update has nothing to change.
    #[error("{0}")]
    Validation(&'static str),

    /// The statement targeted an id that matched no row.
    #[error("{0}")]
    NotFound(&'static str),

    /// An `INSERT ... RETURNING` statement came back empty.
    #[error("statement returned no rows")]
    NoRows,

    /// A row could not be decoded into the expected DTO.
    #[error("malformed row: {0}")]
    MalformedRow(#[from] serde_json::Error),
}
