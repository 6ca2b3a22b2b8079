use crate::model::api::ErrorResponse;
use crate::model::document::Document;
use crate::registry::DocumentRegistry;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Raw index rows as stored, with no signed url substitution.
#[utoipa::path(
    get,
    path = "/documents",
    responses(
        (status = 200, body = Vec<Document>),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry))]
pub async fn handle_list_rows(
    State(registry): State<DocumentRegistry>,
) -> Result<Response, Response> {
    let documents = registry.list_rows().await.map_err(|err| {
        tracing::error!(error=?err, "unable to list document rows");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_details(
                "Failed to retrieve documents",
                err.details(),
            )),
        )
            .into_response()
    })?;

    Ok((StatusCode::OK, Json(documents)).into_response())
}
