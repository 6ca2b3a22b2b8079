use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the metadata index.
///
/// `filename` doubles as the object store key; the stores are only ever
/// linked through it. The persisted `file_url` is the static bucket form.
/// Indexed read paths replace it with a freshly signed url before the row
/// leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Document {
    /// assigned by the index on insert
    pub id: i64,
    /// object store key
    pub filename: String,
    pub subject: String,
    pub file_url: String,
    pub description: String,
    /// assigned by the index on insert, sole ordering key for listings
    pub upload_date: DateTime<Utc>,
}
