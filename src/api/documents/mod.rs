pub mod delete_document;
pub mod list_files;
pub mod list_indexed;
pub mod list_rows;
pub mod upload;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::api::context::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::handle_upload))
        .route("/files", get(list_files::handle_list_files))
        .route("/documents", get(list_rows::handle_list_rows))
        .route(
            "/indexed-documents",
            get(list_indexed::handle_list_indexed),
        )
        .route(
            "/documents/:id",
            delete(delete_document::handle_delete_document),
        )
}
