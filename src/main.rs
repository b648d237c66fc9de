use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use vidshelf::{Config, Database, FileStorage, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = vidshelf::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        vidshelf::logging::init_console_only(&config.logging.level);
    }

    info!("Vidshelf - video file shelf");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to open database {}: {}", config.database.path, e);
            return ExitCode::FAILURE;
        }
    };

    let storage = match FileStorage::new(&config.files.upload_base_path) {
        Ok(storage) => storage,
        Err(e) => {
            error!(
                "Failed to initialize file storage at {}: {}",
                config.files.upload_base_path, e
            );
            return ExitCode::FAILURE;
        }
    };

    // Start every run with an empty upload directory
    match storage.clear_all().await {
        Ok(count) => info!(
            removed = count,
            "Cleared upload directory {}",
            storage.base_path().display()
        ),
        Err(e) => warn!("Failed to clear upload directory: {}", e),
    }

    let server = match WebServer::new(
        &config.server,
        db,
        storage,
        config.files.max_upload_size_bytes(),
    ) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
