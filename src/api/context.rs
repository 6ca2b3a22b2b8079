use crate::config::Config;
use crate::registry::DocumentRegistry;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub registry: DocumentRegistry,
    pub config: Arc<Config>,
}
