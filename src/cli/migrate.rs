use crate::config::{init_database, migrate_database, Settings};

/// Connect to the configured database and apply pending migrations
///
/// Does not build the full AppData; secrets are not needed to migrate.
pub async fn run_migrations(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
