use crate::config::{database, BootstrapSettings};

/// Connect to the configured database and apply pending migrations
///
/// Does not build AppData; no secrets are generated.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = database::connect(settings).await?;
    database::migrate(&db).await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
