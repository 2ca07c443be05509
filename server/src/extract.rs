//! Custom axum extractors that reject with `ApiError`, so malformed input
//! gets the same `{"error": ...}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const INVALID_TODO_ID: &str = "Invalid todo id";

/// JSON request body. Rejections become 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Integer todo id from the `{id}` path segment.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(INVALID_TODO_ID.to_string()))?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::Validation(INVALID_TODO_ID.to_string()))
    }
}
