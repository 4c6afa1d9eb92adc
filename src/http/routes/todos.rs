use axum::{body::Bytes, extract::{Path, Query, State}, routing::get, Router, Json};
use serde_json::{json, Value};

use crate::{
    application::todo_service::TodoService,
    domain::todo::{Todo, TodoFilter, TodoId, UpsertTodo},
    http::types::ApiError,
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api", get(ping))
        .route("/api/", get(ping))
        .route("/api/todo", get(list_todos::<S>).post(upsert_todo::<S>))
        .route("/api/todo/:id", get(get_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn ping() -> Json<Value> { Json(json!({ "message": "pong" })) }

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>, Query(pairs): Query<Vec<(String, String)>>) -> Json<Vec<Todo>> {
    Json(state.service.list(TodoFilter::from_query(pairs)).await)
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    state.service.get(&TodoId::from(id)).await.map(Json).ok_or(ApiError::NotFound)
}

// Read as raw bytes: any content type goes, and a body that does not decode
// becomes an empty record instead of a rejection.
async fn upsert_todo<S: TodoService>(State(state): State<AppState<S>>, body: Bytes) -> Json<Vec<Todo>> {
    let input = serde_json::from_slice::<UpsertTodo>(&body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "undecodable todo body, upserting empty record");
        UpsertTodo::default()
    });
    Json(state.service.upsert(input).await)
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    if state.service.delete(&TodoId::from(id)).await { Ok(Json(Value::Null)) } else { Err(ApiError::NotFound) }
}
