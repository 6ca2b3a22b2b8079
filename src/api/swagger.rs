use crate::api::{documents, health};
use crate::model::api::*;
use crate::model::document::Document;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::home_handler,
        health::health_handler,
        health::test_db_handler,
        documents::upload::handle_upload,
        documents::list_files::handle_list_files,
        documents::list_rows::handle_list_rows,
        documents::list_indexed::handle_list_indexed,
        documents::delete_document::handle_delete_document,
    ),
    components(
        schemas(
            Document,
            MessageResponse,
            HealthResponse,
            UploadResponse,
            FileEntry,
            FilesResponse,
            IndexedDocumentsResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "cloud dms", description = "Document management backend")
    )
)]
pub struct ApiDoc;
