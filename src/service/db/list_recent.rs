use crate::model::document::Document;
use anyhow::Context;
use sqlx::{Connection, MySqlConnection};

#[tracing::instrument(skip(database_url))]
pub(crate) async fn list_recent(database_url: &str, limit: u32) -> anyhow::Result<Vec<Document>> {
    let mut conn = MySqlConnection::connect(database_url)
        .await
        .context("could not connect to metadata index")?;

    let documents = sqlx::query_as::<_, Document>(
        "SELECT id, filename, subject, file_url, description, upload_date \
         FROM documents ORDER BY upload_date DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(&mut conn)
    .await
    .context("could not list recent document rows")?;

    conn.close().await.ok();
    Ok(documents)
}
