use anyhow::Context;
use sqlx::{Connection, MySqlConnection};

#[tracing::instrument(skip(database_url, file_url))]
pub(crate) async fn insert(
    database_url: &str,
    filename: &str,
    subject: &str,
    file_url: &str,
    description: &str,
) -> anyhow::Result<i64> {
    let mut conn = MySqlConnection::connect(database_url)
        .await
        .context("could not connect to metadata index")?;

    let result = sqlx::query(
        "INSERT INTO documents (filename, subject, file_url, description) VALUES (?, ?, ?, ?)",
    )
    .bind(filename)
    .bind(subject)
    .bind(file_url)
    .bind(description)
    .execute(&mut conn)
    .await
    .context(format!("could not insert document row for {filename}"))?;

    conn.close().await.ok();
    Ok(result.last_insert_id() as i64)
}
