use crate::model::api::{ErrorResponse, FilesResponse};
use crate::registry::DocumentRegistry;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Lists the bucket directly. The metadata index is never consulted, so
/// orphan objects show up here too.
#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, body = FilesResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry))]
pub async fn handle_list_files(
    State(registry): State<DocumentRegistry>,
) -> Result<Response, Response> {
    let files = registry.list_raw().await.map_err(|err| {
        tracing::error!(error=?err, "unable to list stored files");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_details(
                "Failed to retrieve files",
                err.details(),
            )),
        )
            .into_response()
    })?;

    Ok((StatusCode::OK, Json(FilesResponse { files })).into_response())
}
