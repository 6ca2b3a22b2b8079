use crate::api::context::AppState;
use crate::model::api::{ErrorResponse, HealthResponse, MessageResponse};
use crate::registry::DocumentRegistry;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, body = MessageResponse))
)]
pub async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Cloud DMS Backend API".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/test-db",
    responses(
        (status = 200, body = MessageResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry))]
pub async fn test_db_handler(
    State(registry): State<DocumentRegistry>,
) -> Result<Response, Response> {
    registry.check_index().await.map_err(|err| {
        tracing::error!(error=?err, "database connectivity check failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_details(
                "Database connection failed",
                err.details(),
            )),
        )
            .into_response()
    })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Database connection successful".to_string(),
        }),
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/test-db", get(test_db_handler))
}
