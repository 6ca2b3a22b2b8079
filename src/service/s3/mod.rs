mod delete;
mod list;
mod presign;
mod put;

use aws_sdk_s3::{self as s3, primitives::ByteStream};
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

/// Object store client. Every call is one independent round trip against the
/// configured bucket; there is no retry and no state shared across calls.
#[derive(Clone, Debug)]
pub struct S3Client {
    /// Inner S3 client
    inner: s3::Client,
    storage_bucket: String,
}

#[cfg_attr(test, automock)]
impl S3Client {
    pub fn new(inner: s3::Client, storage_bucket: &str) -> Self {
        S3Client {
            inner,
            storage_bucket: storage_bucket.to_string(),
        }
    }

    /// Puts the provided content into the bucket at the provided key.
    /// The payload is fully buffered before the call returns.
    pub async fn put(&self, key: &str, content: Vec<u8>) -> anyhow::Result<()> {
        let body = ByteStream::from(content);
        put::put(&self.inner, &self.storage_bucket, key, body).await
    }

    /// Lists up to `max_keys` keys in the bucket.
    pub async fn list(&self, max_keys: i32) -> anyhow::Result<Vec<String>> {
        list::list(&self.inner, &self.storage_bucket, max_keys).await
    }

    /// Deletes the provided key from the bucket. Deleting a key that does not
    /// exist succeeds per S3 semantics.
    pub async fn delete(&self, key: &str) -> anyhow::Result<()> {
        delete::delete(&self.inner, &self.storage_bucket, key).await
    }

    /// Gets a presigned download url for the provided key.
    pub async fn get_presigned_url(
        &self,
        key: &str,
        duration_seconds: u64,
    ) -> anyhow::Result<String> {
        presign::get_presigned_url(&self.inner, &self.storage_bucket, key, duration_seconds).await
    }
}
