//! `/todos` endpoints.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use todo_core::todos;
use todo_core::{CreateTodo, DeletedTodo, Todo, UpdateTodo};

use crate::error::ApiError;
use crate::extract::{JsonBody, TodoId};
use crate::store::SharedStore;

pub fn router() -> Router<SharedStore> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

/// GET /todos, ordered by ascending id
async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    let rows = store.execute(&todos::build_list_todos()).await?;
    Ok(Json(todos::parse_list_todos(rows)?))
}

async fn get_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    let rows = store.execute(&todos::build_get_todo(id)).await?;
    Ok(Json(todos::parse_todo(rows)?))
}

async fn create_todo(
    State(store): State<SharedStore>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let statement = todos::build_create_todo(&input)?;
    let rows = store.execute(&statement).await?;
    let todo = todos::parse_created_todo(rows)?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id}. Only the supplied fields change; an empty update is
/// rejected before the store is touched.
async fn update_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let statement = todos::build_update_todo(id, &input)?;
    let rows = store.execute(&statement).await?;
    let todo = todos::parse_todo(rows)?;
    tracing::info!(id, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<DeletedTodo>, ApiError> {
    let rows = store.execute(&todos::build_delete_todo(id)).await?;
    let deleted = todos::parse_deleted_todo(rows)?;
    tracing::info!(id, "todo deleted");
    Ok(Json(deleted))
}
