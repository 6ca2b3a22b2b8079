use anyhow::Context;
use sqlx::{Connection, MySqlConnection};

#[tracing::instrument(skip(database_url))]
pub(crate) async fn get_filename(database_url: &str, id: i64) -> anyhow::Result<Option<String>> {
    let mut conn = MySqlConnection::connect(database_url)
        .await
        .context("could not connect to metadata index")?;

    let filename = sqlx::query_scalar::<_, String>("SELECT filename FROM documents WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut conn)
        .await
        .context(format!("could not look up filename for document {id}"))?;

    conn.close().await.ok();
    Ok(filename)
}
