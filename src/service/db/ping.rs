use anyhow::Context;
use sqlx::{Connection, MySqlConnection};

/// Connect and disconnect, nothing else.
#[tracing::instrument(skip(database_url))]
pub(crate) async fn ping(database_url: &str) -> anyhow::Result<()> {
    let conn = MySqlConnection::connect(database_url)
        .await
        .context("could not connect to metadata index")?;

    conn.close()
        .await
        .context("could not close metadata index connection")?;
    Ok(())
}
