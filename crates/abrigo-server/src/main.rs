//! # Abrigo Server
//!
//! Main entry point for the Abrigo pet adoption backend.

use abrigo_config::{ConfigLoader, ObservabilityConfig};
use abrigo_core::{AbrigoError, AbrigoResult};
use abrigo_repository::MongoDatabase;
use abrigo_rest::create_router;
use tokio::signal;
use tracing::{error, info};

mod startup;

use startup::{build_state, print_banner, print_startup_info};

#[tokio::main]
async fn main() {
    // Load configuration before logging so the subscriber honors it
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = config_loader.get().await;

    init_logging(&config.observability);

    print_banner();
    info!("Starting Abrigo Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config_loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config_loader: ConfigLoader) -> AbrigoResult<()> {
    let config = config_loader.get().await;

    // Connect to MongoDB and prepare collections
    let database = MongoDatabase::connect(&config.mongo).await?;
    database.ensure_indexes().await?;

    // Wire repositories, services, and the REST router
    let (state, token_provider) = build_state(&database, config.security.clone());
    let router = create_router(state, token_provider, &config.server);

    let addr = config.server.addr();
    print_startup_info(&config.server.host, config.server.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AbrigoError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AbrigoError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},abrigo=debug,tower_http=debug",
            config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to install signal handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
