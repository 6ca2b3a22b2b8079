use crate::model::api::{ErrorResponse, MessageResponse};
use crate::registry::{DocumentRegistry, RegistryError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(serde::Deserialize)]
pub struct Params {
    pub id: i64,
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(
        ("id" = i64, Path, description = "Document ID")
    ),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry))]
pub async fn handle_delete_document(
    State(registry): State<DocumentRegistry>,
    Path(Params { id }): Path<Params>,
) -> Result<Response, Response> {
    match registry.remove(id).await {
        Ok(removed) => Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Document '{}' deleted successfully", removed.filename),
            }),
        )
            .into_response()),
        Err(RegistryError::NotFound(_)) => {
            tracing::warn!(id, "document not found");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Document not found")),
            )
                .into_response())
        }
        Err(err) => {
            tracing::error!(error=?err, id, "unable to delete document");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to delete document",
                    err.details(),
                )),
            )
                .into_response())
        }
    }
}
