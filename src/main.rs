use catalog_service::{
    api::{self, AppState},
    config::{self, settings::AppConfig},
    core::{CatalogService, SeaOrmProductRepository, seed::seed_catalog},
    errors::Result,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Loaded configuration: {:?}", app_config);

    // 4. Connect to the database and make sure the tables exist
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the catalog if a seed file is configured
    if let Some(path) = &app_config.seed_path {
        let seed = config::seed::load_seed(path)?;
        seed_catalog(&db, &seed)
            .await
            .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    }

    // 6. Serve until Ctrl-C / SIGTERM
    let catalog = CatalogService::new(Arc::new(SeaOrmProductRepository::new(db)));
    api::server::serve(&app_config.server, AppState::new(catalog))
        .await
        .inspect_err(|e| error!("Server failed: {}", e))?;

    Ok(())
}
