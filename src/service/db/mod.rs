mod delete_by_id;
mod get_filename;
mod insert;
mod list_all;
mod list_recent;
mod ping;

#[allow(unused_imports)]
use mockall::automock;

use crate::model::document::Document;

#[cfg(test)]
pub use MockIndexClient as Index;
#[cfg(not(test))]
pub use IndexClient as Index;

/// Metadata index client. Each operation opens its own connection and closes
/// it before returning. There is no pooling, and no transaction ever spans
/// more than one call. Connectivity failures surface to the caller; nothing is retried.
#[derive(Clone, Debug)]
pub struct IndexClient {
    database_url: String,
}

#[cfg_attr(test, automock)]
impl IndexClient {
    pub fn new(database_url: &str) -> Self {
        IndexClient {
            database_url: database_url.to_string(),
        }
    }

    /// Inserts one document row and returns the id the index assigned to it.
    /// `upload_date` is left to the column default.
    pub async fn insert(
        &self,
        filename: &str,
        subject: &str,
        file_url: &str,
        description: &str,
    ) -> anyhow::Result<i64> {
        insert::insert(&self.database_url, filename, subject, file_url, description).await
    }

    /// Fetches every document row, unordered.
    pub async fn list_all(&self) -> anyhow::Result<Vec<Document>> {
        list_all::list_all(&self.database_url).await
    }

    /// Fetches the `limit` most recent rows, newest first.
    pub async fn list_recent(&self, limit: u32) -> anyhow::Result<Vec<Document>> {
        list_recent::list_recent(&self.database_url, limit).await
    }

    /// Looks up the object store key for a document id.
    pub async fn get_filename(&self, id: i64) -> anyhow::Result<Option<String>> {
        get_filename::get_filename(&self.database_url, id).await
    }

    /// Deletes the row for a document id, returning how many rows went away.
    pub async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64> {
        delete_by_id::delete_by_id(&self.database_url, id).await
    }

    /// Connects and immediately disconnects, proving the index is reachable.
    pub async fn ping(&self) -> anyhow::Result<()> {
        ping::ping(&self.database_url).await
    }
}
