use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

/// Establish a pooled connection to the store.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // An in-memory SQLite database lives and dies with its connection
    if database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(10)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800));
    }

    let db = Database::connect(opts).await?;
    Ok(db)
}
