//! `/users` endpoints.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use todo_core::users;
use todo_core::{CreateUser, User};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::store::SharedStore;

pub fn router() -> Router<SharedStore> {
    Router::new().route("/users", get(list_users).post(create_user))
}

async fn list_users(State(store): State<SharedStore>) -> Result<Json<Vec<User>>, ApiError> {
    let rows = store.execute(&users::build_list_users()).await?;
    Ok(Json(users::parse_list_users(rows)?))
}

/// POST /users. Responds with the row the insert returned.
async fn create_user(
    State(store): State<SharedStore>,
    JsonBody(input): JsonBody<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let statement = users::build_create_user(&input)?;
    let rows = store.execute(&statement).await?;
    let user = users::parse_created_user(rows)?;
    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}
