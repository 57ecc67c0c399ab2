//! Cafe Directory Server entry point

use cafe_server::config::ServerConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Cafe Directory Server v{}", env!("CARGO_PKG_VERSION"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cafe_server::run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}
