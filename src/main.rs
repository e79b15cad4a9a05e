use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_directory::config::Config;
use employee_directory::repository;
use employee_directory::storage::{LocalStorage, StorageProvider};
use employee_directory::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_directory=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting employee directory...");

    // Load configuration
    let config = Arc::new(Config::load()?);
    tracing::info!("Configuration loaded");

    // Connect the persistence service
    let employees = repository::connect(&config.database).await?;
    tracing::info!("Employee store initialized ({})", employees.backend());

    // Content directory for photos
    let photos: Arc<dyn StorageProvider> =
        Arc::new(LocalStorage::new(&config.storage.content_dir));
    tracing::info!(
        "Photo storage initialized ({}) at {}",
        photos.storage_type(),
        config.storage.content_dir
    );

    let state = AppState {
        employees,
        photos,
        config: config.clone(),
    };

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
