use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{User, UserRegistration};
use super::registry::{DirectoryError, UserRegistry};

/// Router exposing registration and lookup over the shared registry.
pub fn directory_router(registry: Arc<UserRegistry>) -> Router {
    Router::new()
        .route("/api/v1/users", post(register_handler))
        .route("/api/v1/users/:user_id", get(find_handler))
        .route("/api/v1/users/:user_id/exists", get(exists_handler))
        .with_state(registry)
}

pub(crate) async fn register_handler(
    State(registry): State<Arc<UserRegistry>>,
    axum::Json(registration): axum::Json<UserRegistration>,
) -> Response {
    let user = match User::try_from(registration) {
        Ok(user) => user,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match registry.try_register(user) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored.view())).into_response(),
        Err(error @ DirectoryError::DuplicateIdentifier(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn find_handler(
    State(registry): State<Arc<UserRegistry>>,
    Path(user_id): Path<String>,
) -> Response {
    match registry.find_by_id(&user_id) {
        Some(user) => (StatusCode::OK, axum::Json(user.view())).into_response(),
        None => {
            let payload = json!({
                "error": "user not found",
                "user_id": user_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn exists_handler(
    State(registry): State<Arc<UserRegistry>>,
    Path(user_id): Path<String>,
) -> Response {
    let exists = registry.exists(&user_id);
    (
        StatusCode::OK,
        axum::Json(json!({ "user_id": user_id, "exists": exists })),
    )
        .into_response()
}
