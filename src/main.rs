use std::sync::Arc;

use booking_backend::app_data::AppData;
use booking_backend::cli::{self, Cli, Commands};
use booking_backend::config::{database, init_logging, BootstrapSettings, LoggingConfig, SystemEnvironment};
use booking_backend::server;
use clap::Parser;
use poem::{listener::TcpListener, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Guard must outlive the server for file logs to flush
    let _log_guard = init_logging(&LoggingConfig::from_env_provider(&SystemEnvironment))?;

    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Bootstrap settings loaded: {:?}", settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await,
        Commands::CreateAdmin {
            email,
            password,
            name,
            phone,
        } => {
            let app_data = init_app_data(&settings).await?;
            cli::admin::create_admin(app_data, email, password, name, phone).await
        }
        Commands::Serve => serve(&settings).await,
    }
}

async fn init_app_data(settings: &BootstrapSettings) -> Result<Arc<AppData>, Box<dyn std::error::Error>> {
    let db = database::connect(settings).await?;
    database::migrate(&db).await?;
    Ok(Arc::new(AppData::init(db, settings).await?))
}

async fn serve(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let app_data = init_app_data(settings).await?;

    tokio::fs::create_dir_all(settings.upload_dir()).await?;
    let app = server::build_app(app_data, settings);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;
    Ok(())
}
