use std::sync::Arc;

use crate::model::api::FileEntry;
use crate::model::document::Document;
use crate::service::db::Index;
use crate::service::s3::S3;

/// How many keys a raw object store listing will return at most.
const RAW_LIST_MAX_KEYS: i32 = 100;

/// How many rows an indexed listing returns.
pub const INDEXED_LIST_LIMIT: u32 = 50;

const DEFAULT_SUBJECT: &str = "General";

/// Failure taxonomy for registry operations. Client errors keep their cause
/// attached so handlers can surface it as `details`; nothing in here is
/// retried. A failed operation is reported to the caller and that is it.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no file uploaded")]
    MissingPayload,
    #[error("document {0} not found")]
    NotFound(i64),
    #[error("object store unavailable")]
    ObjectStore(#[source] anyhow::Error),
    #[error("metadata index unavailable")]
    Index(#[source] anyhow::Error),
    #[error("metadata index write failed")]
    IndexWrite(#[source] anyhow::Error),
}

impl RegistryError {
    /// The underlying store error, for response bodies that carry `details`.
    pub fn details(&self) -> Option<String> {
        match self {
            RegistryError::ObjectStore(err)
            | RegistryError::Index(err)
            | RegistryError::IndexWrite(err) => Some(format!("{err:#}")),
            RegistryError::MissingPayload | RegistryError::NotFound(_) => None,
        }
    }
}

/// The result of a successful ingest.
#[derive(Debug)]
pub struct IngestReceipt {
    /// static url of the stored object, deliberately not presigned; the
    /// read paths mint signed urls of their own
    pub file_url: String,
}

/// The result of a successful remove.
#[derive(Debug)]
pub struct RemovedDocument {
    pub filename: String,
}

/// Orchestrates the object store and the metadata index.
///
/// The two stores fail independently and nothing here is transactional, so
/// every dual-store operation commits to one ordering: the object is written
/// before the row that references it, and the row is removed even when the
/// object delete fails. The only orphan shape either path can leave behind is
/// an object without a row, never a row pointing at a missing object, which
/// would surface broken links to readers. Orphans are left for an external
/// reconciliation sweep; the registry does not clean them up.
#[derive(Clone)]
pub struct DocumentRegistry {
    storage: Arc<S3>,
    index: Arc<Index>,
    bucket: String,
    region: String,
    url_ttl_seconds: u64,
}

impl DocumentRegistry {
    pub fn new(
        storage: Arc<S3>,
        index: Arc<Index>,
        bucket: &str,
        region: &str,
        url_ttl_seconds: u64,
    ) -> Self {
        DocumentRegistry {
            storage,
            index,
            bucket: bucket.to_string(),
            region: region.to_string(),
            url_ttl_seconds,
        }
    }

    fn static_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    /// Stores a document in both backing stores.
    ///
    /// Keys are caller-chosen: two concurrent ingests of the same filename
    /// are last-writer-wins on the object and leave two rows in the index.
    #[tracing::instrument(skip(self, payload), fields(filename = %filename))]
    pub async fn ingest(
        &self,
        filename: &str,
        subject: Option<String>,
        description: Option<String>,
        payload: Option<Vec<u8>>,
    ) -> Result<IngestReceipt, RegistryError> {
        let payload = payload.ok_or(RegistryError::MissingPayload)?;
        let subject = subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        let description = description.unwrap_or_default();

        // Object first: if this fails, no row ever references it.
        self.storage
            .put(filename, payload)
            .await
            .map_err(RegistryError::ObjectStore)?;

        let file_url = self.static_url(filename);

        // Not rolled back on failure: the uploaded object stays behind as an
        // orphan for a later reconciliation sweep.
        self.index
            .insert(filename, &subject, &file_url, &description)
            .await
            .map_err(RegistryError::IndexWrite)?;

        Ok(IngestReceipt { file_url })
    }

    /// Lists objects straight from the store, with a presigned url per key.
    /// A key that fails to presign is logged and skipped; the rest of the
    /// listing still goes out.
    #[tracing::instrument(skip(self))]
    pub async fn list_raw(&self) -> Result<Vec<FileEntry>, RegistryError> {
        let keys = self
            .storage
            .list(RAW_LIST_MAX_KEYS)
            .await
            .map_err(RegistryError::ObjectStore)?;

        let mut files = Vec::with_capacity(keys.len());
        for key in keys {
            match self
                .storage
                .get_presigned_url(&key, self.url_ttl_seconds)
                .await
            {
                Ok(url) => files.push(FileEntry { name: key, url }),
                Err(err) => {
                    tracing::warn!(error=?err, key=%key, "could not presign key, skipping");
                }
            }
        }
        Ok(files)
    }

    /// Lists the most recent rows from the index, newest first, each with its
    /// persisted static url replaced by a fresh signed one. Unlike
    /// [`Self::list_raw`], a signing failure here fails the whole call rather
    /// than silently handing out a stale url.
    #[tracing::instrument(skip(self))]
    pub async fn list_indexed(&self, limit: u32) -> Result<Vec<Document>, RegistryError> {
        let mut documents = self
            .index
            .list_recent(limit)
            .await
            .map_err(RegistryError::Index)?;

        for document in &mut documents {
            document.file_url = self
                .storage
                .get_presigned_url(&document.filename, self.url_ttl_seconds)
                .await
                .map_err(RegistryError::ObjectStore)?;
        }
        Ok(documents)
    }

    /// Removes a document from both stores. The object delete is best effort:
    /// if it fails the row is removed anyway, leaving at worst an orphan
    /// object, the same direction of divergence ingest can leave.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<RemovedDocument, RegistryError> {
        let filename = self
            .index
            .get_filename(id)
            .await
            .map_err(RegistryError::Index)?
            .ok_or(RegistryError::NotFound(id))?;

        if let Err(err) = self.storage.delete(&filename).await {
            tracing::warn!(error=?err, filename=%filename, "object delete failed, removing row anyway");
        }

        self.index
            .delete_by_id(id)
            .await
            .map_err(RegistryError::IndexWrite)?;

        Ok(RemovedDocument { filename })
    }

    /// Raw index rows, no url substitution.
    #[tracing::instrument(skip(self))]
    pub async fn list_rows(&self) -> Result<Vec<Document>, RegistryError> {
        self.index.list_all().await.map_err(RegistryError::Index)
    }

    /// Proves the metadata index is reachable.
    #[tracing::instrument(skip(self))]
    pub async fn check_index(&self) -> Result<(), RegistryError> {
        self.index.ping().await.map_err(RegistryError::Index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::db::MockIndexClient;
    use crate::service::s3::MockS3Client;
    use chrono::TimeZone;
    use chrono::Utc;
    use mockall::predicate::eq;

    const BUCKET: &str = "cloud-dms-bucket1";
    const REGION: &str = "us-east-1";

    fn registry(storage: MockS3Client, index: MockIndexClient) -> DocumentRegistry {
        DocumentRegistry::new(Arc::new(storage), Arc::new(index), BUCKET, REGION, 3600)
    }

    fn row(id: i64, filename: &str, day: u32) -> Document {
        Document {
            id,
            filename: filename.to_string(),
            subject: "General".to_string(),
            file_url: format!("https://{BUCKET}.s3.{REGION}.amazonaws.com/{filename}"),
            description: String::new(),
            upload_date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn ingest_writes_object_then_row_and_returns_static_url() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        storage
            .expect_put()
            .withf(|key, content| key == "a.pdf" && content == b"bytes")
            .times(1)
            .returning(|_, _| Ok(()));
        index
            .expect_insert()
            .withf(|filename, subject, file_url, description| {
                filename == "a.pdf"
                    && subject == "Math"
                    && file_url == "https://cloud-dms-bucket1.s3.us-east-1.amazonaws.com/a.pdf"
                    && description == "notes"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(1));

        let receipt = registry(storage, index)
            .ingest(
                "a.pdf",
                Some("Math".to_string()),
                Some("notes".to_string()),
                Some(b"bytes".to_vec()),
            )
            .await
            .unwrap();

        assert_eq!(
            receipt.file_url,
            "https://cloud-dms-bucket1.s3.us-east-1.amazonaws.com/a.pdf"
        );
    }

    #[tokio::test]
    async fn ingest_substitutes_defaults() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        storage.expect_put().times(1).returning(|_, _| Ok(()));
        index
            .expect_insert()
            .withf(|_, subject, _, description| subject == "General" && description.is_empty())
            .times(1)
            .returning(|_, _, _, _| Ok(2));

        registry(storage, index)
            .ingest("b.txt", None, None, Some(b"x".to_vec()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ingest_without_payload_touches_neither_store() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        storage.expect_put().times(0);
        index.expect_insert().times(0);

        let err = registry(storage, index)
            .ingest("a.pdf", None, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::MissingPayload));
    }

    #[tokio::test]
    async fn ingest_aborts_before_index_write_when_put_fails() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        storage
            .expect_put()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("bucket unreachable")));
        index.expect_insert().times(0);

        let err = registry(storage, index)
            .ingest("a.pdf", None, None, Some(b"x".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::ObjectStore(_)));
    }

    #[tokio::test]
    async fn ingest_reports_index_failure_without_rolling_back_upload() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        // The put happens and stays: the orphan object is accepted, and no
        // delete is issued to undo it.
        storage.expect_put().times(1).returning(|_, _| Ok(()));
        storage.expect_delete().times(0);
        index
            .expect_insert()
            .times(1)
            .returning(|_, _, _, _| Err(anyhow::anyhow!("index down")));

        let err = registry(storage, index)
            .ingest("a.pdf", None, None, Some(b"x".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::IndexWrite(_)));
    }

    #[tokio::test]
    async fn list_raw_skips_keys_that_fail_to_presign() {
        let mut storage = MockS3Client::default();
        let index = MockIndexClient::default();

        storage.expect_list().with(eq(100)).times(1).returning(|_| {
            Ok(vec![
                "a.pdf".to_string(),
                "b.pdf".to_string(),
                "c.pdf".to_string(),
            ])
        });
        storage
            .expect_get_presigned_url()
            .withf(|key, _| key == "b.pdf")
            .returning(|_, _| Err(anyhow::anyhow!("signing failed")));
        storage
            .expect_get_presigned_url()
            .withf(|key, _| key != "b.pdf")
            .returning(|key, _| Ok(format!("https://signed.example.com/{key}?X-Amz-Expires=3600")));

        let files = registry(storage, index).list_raw().await.unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn list_raw_of_empty_bucket_is_empty_not_an_error() {
        let mut storage = MockS3Client::default();
        let index = MockIndexClient::default();

        storage.expect_list().times(1).returning(|_| Ok(vec![]));
        storage.expect_get_presigned_url().times(0);

        let files = registry(storage, index).list_raw().await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn list_indexed_replaces_stored_url_with_signed_one() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        let stored = row(1, "a.pdf", 1);
        let static_url = stored.file_url.clone();
        index
            .expect_list_recent()
            .with(eq(50))
            .times(1)
            .returning(move |_| Ok(vec![stored.clone()]));
        storage
            .expect_get_presigned_url()
            .with(eq("a.pdf"), eq(3600))
            .times(1)
            .returning(|key, _| Ok(format!("https://signed.example.com/{key}?X-Amz-Expires=3600")));

        let documents = registry(storage, index).list_indexed(50).await.unwrap();

        assert_eq!(documents.len(), 1);
        assert_ne!(documents[0].file_url, static_url);
        assert!(documents[0].file_url.contains("X-Amz-Expires"));
    }

    #[tokio::test]
    async fn list_indexed_preserves_index_order_and_limit() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        // t3 then t2: the index already ordered by upload_date descending and
        // applied the limit; the registry must not reorder.
        index
            .expect_list_recent()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(vec![row(3, "t3.pdf", 3), row(2, "t2.pdf", 2)]));
        storage
            .expect_get_presigned_url()
            .returning(|key, _| Ok(format!("https://signed.example.com/{key}")));

        let documents = registry(storage, index).list_indexed(2).await.unwrap();

        let filenames: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(filenames, vec!["t3.pdf", "t2.pdf"]);
    }

    #[tokio::test]
    async fn list_indexed_fails_whole_call_when_signing_fails() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        index
            .expect_list_recent()
            .times(1)
            .returning(|_| Ok(vec![row(1, "a.pdf", 1)]));
        storage
            .expect_get_presigned_url()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("signing failed")));

        let err = registry(storage, index).list_indexed(50).await.unwrap_err();
        assert!(matches!(err, RegistryError::ObjectStore(_)));
    }

    #[tokio::test]
    async fn remove_of_unknown_id_touches_nothing_else() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        index
            .expect_get_filename()
            .with(eq(999))
            .times(1)
            .returning(|_| Ok(None));
        storage.expect_delete().times(0);
        index.expect_delete_by_id().times(0);

        let err = registry(storage, index).remove(999).await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(999)));
    }

    #[tokio::test]
    async fn remove_deletes_object_then_row() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        index
            .expect_get_filename()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(Some("a.pdf".to_string())));
        storage
            .expect_delete()
            .with(eq("a.pdf"))
            .times(1)
            .returning(|_| Ok(()));
        index
            .expect_delete_by_id()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(1));

        let removed = registry(storage, index).remove(7).await.unwrap();
        assert_eq!(removed.filename, "a.pdf");
    }

    #[tokio::test]
    async fn remove_still_deletes_row_when_object_delete_fails() {
        let mut storage = MockS3Client::default();
        let mut index = MockIndexClient::default();

        index
            .expect_get_filename()
            .times(1)
            .returning(|_| Ok(Some("a.pdf".to_string())));
        storage
            .expect_delete()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("bucket unreachable")));
        index.expect_delete_by_id().times(1).returning(|_| Ok(1));

        let removed = registry(storage, index).remove(7).await.unwrap();
        assert_eq!(removed.filename, "a.pdf");
    }
}
