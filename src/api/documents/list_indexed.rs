use crate::model::api::{ErrorResponse, IndexedDocumentsResponse};
use crate::registry::{DocumentRegistry, INDEXED_LIST_LIMIT};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// The fixed recency-ordered listing: the fifty newest rows, each carrying a
/// live signed url instead of the persisted static one.
#[utoipa::path(
    get,
    path = "/indexed-documents",
    responses(
        (status = 200, body = IndexedDocumentsResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry))]
pub async fn handle_list_indexed(
    State(registry): State<DocumentRegistry>,
) -> Result<Response, Response> {
    let documents = registry
        .list_indexed(INDEXED_LIST_LIMIT)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to list indexed documents");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to retrieve indexed documents",
                    err.details(),
                )),
            )
                .into_response()
        })?;

    Ok((
        StatusCode::OK,
        Json(IndexedDocumentsResponse { documents }),
    )
        .into_response())
}
