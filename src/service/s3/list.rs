use anyhow::Context;
use aws_sdk_s3 as s3;

/// Lists the keys in the bucket, capped at `max_keys`.
/// An empty bucket is an empty list, not an error.
#[tracing::instrument(skip(client))]
pub(crate) async fn list(
    client: &s3::Client,
    bucket: &str,
    max_keys: i32,
) -> anyhow::Result<Vec<String>> {
    let resp = client
        .list_objects_v2()
        .bucket(bucket)
        .max_keys(max_keys)
        .send()
        .await
        .context(format!("could not list objects in bucket {bucket}"))?;

    let mut keys = Vec::new();
    for object in resp.contents() {
        if let Some(key) = object.key() {
            keys.push(key.to_string());
        }
    }
    Ok(keys)
}
