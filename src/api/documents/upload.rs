use crate::model::api::{ErrorResponse, UploadResponse};
use crate::registry::{DocumentRegistry, RegistryError};
use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Default)]
struct UploadForm {
    file_name: Option<String>,
    payload: Option<Vec<u8>>,
    subject: Option<String>,
    description: Option<String>,
}

/// Accepts a multipart form with the file bytes under key `file` and optional
/// `subject` and `description` fields.
#[utoipa::path(
    post,
    path = "/upload",
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(registry, multipart))]
pub async fn handle_upload(
    State(registry): State<DocumentRegistry>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let form = read_form(&mut multipart).await.map_err(|err| {
        tracing::error!(error=?err, "unable to read upload form");
        no_file_uploaded()
    })?;

    let filename = match form.file_name {
        Some(filename) if !filename.is_empty() => filename,
        _ => return Err(no_file_uploaded()),
    };

    match registry
        .ingest(&filename, form.subject, form.description, form.payload)
        .await
    {
        Ok(receipt) => Ok((
            StatusCode::OK,
            Json(UploadResponse {
                message: "File uploaded successfully".to_string(),
                file_url: receipt.file_url,
            }),
        )
            .into_response()),
        Err(RegistryError::MissingPayload) => Err(no_file_uploaded()),
        Err(err @ RegistryError::ObjectStore(_)) => {
            tracing::error!(error=?err, filename=%filename, "object upload failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("S3 upload failed", err.details())),
            )
                .into_response())
        }
        Err(err) => {
            // The object went up but the row did not: the orphan object is
            // left behind, the caller just sees the failed insert.
            tracing::error!(error=?err, filename=%filename, "metadata insert failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("DB insert failed", err.details())),
            )
                .into_response())
        }
    }
}

fn no_file_uploaded() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("No file uploaded")),
    )
        .into_response()
}

async fn read_form(multipart: &mut Multipart) -> anyhow::Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.context("expected field")? {
        let name = field.name().context("expected field name")?.to_string();

        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.payload = Some(field.bytes().await.context("expected bytes")?.to_vec());
            }
            "subject" => form.subject = Some(field.text().await.context("expected text")?),
            "description" => {
                form.description = Some(field.text().await.context("expected text")?);
            }
            _ => {}
        }
    }

    Ok(form)
}
