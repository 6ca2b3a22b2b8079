use anyhow::Context;
use aws_sdk_s3 as s3;
use s3::presigning::PresigningConfig;
use std::time::Duration;

/// Generate a URL for a presigned GET request.
#[tracing::instrument(skip(client))]
pub(crate) async fn get_presigned_url(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    duration_seconds: u64,
) -> anyhow::Result<String> {
    let expires_in = Duration::from_secs(duration_seconds);
    let presigned_request = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(PresigningConfig::expires_in(expires_in).context("invalid presign duration")?)
        .await
        .context("failed to create presigned URL")?;

    Ok(presigned_request.uri().to_string())
}
