use anyhow::Context;
use sqlx::{Connection, MySqlConnection};

#[tracing::instrument(skip(database_url))]
pub(crate) async fn delete_by_id(database_url: &str, id: i64) -> anyhow::Result<u64> {
    let mut conn = MySqlConnection::connect(database_url)
        .await
        .context("could not connect to metadata index")?;

    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await
        .context(format!("could not delete document row {id}"))?;

    conn.close().await.ok();
    Ok(result.rows_affected())
}
