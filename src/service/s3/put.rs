use anyhow::Context;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;

#[tracing::instrument(skip(client, body))]
pub(crate) async fn put(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    body: ByteStream,
) -> anyhow::Result<()> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body)
        .send()
        .await
        .context(format!("could not put item {key} into bucket {bucket}"))?;
    Ok(())
}
