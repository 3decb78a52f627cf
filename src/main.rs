use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use ticketdesk_backend::api::build_app;
use ticketdesk_backend::cli::{self, Cli, Commands};
use ticketdesk_backend::config::{
    init_database, init_logging, migrate_database, LoggingConfig, SecretManager, Settings,
    SystemEnvironment,
};
use ticketdesk_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env = SystemEnvironment;
    init_logging(&LoggingConfig::from_env_provider(&env))?;

    let cli = Cli::parse();
    let settings = Settings::from_env_provider(&env)?;

    match cli.command() {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await,
        Commands::CreateAdmin { username } => {
            let app_data = init_app_data(&env, settings).await?;
            cli::bootstrap::create_admin(app_data, &username).await
        }
        Commands::Serve => {
            let bind_address = settings.bind_address();
            let app_data = init_app_data(&env, settings).await?;

            if !app_data.settings.app_env().is_production() {
                tracing::warn!("Running in development mode; /api/dev/elevate-user is enabled");
            }

            tracing::info!("Starting server on http://{}", bind_address);
            tracing::info!("Swagger UI available at /swagger, API endpoints under /api");

            Server::new(TcpListener::bind(bind_address))
                .run(build_app(app_data))
                .await?;
            Ok(())
        }
    }
}

/// Secrets, database connection and migrations, in that order
async fn init_app_data(
    env: &SystemEnvironment,
    settings: Settings,
) -> Result<Arc<AppData>, Box<dyn std::error::Error>> {
    let secret_manager = Arc::new(SecretManager::init(env)?);
    tracing::debug!("Secrets loaded: {}", secret_manager);

    let db = init_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    Ok(Arc::new(AppData::new(db, settings, secret_manager)))
}
