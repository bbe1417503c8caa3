//! Pulse Oximeter Entry Point
//!
//! Initializes logging, loads configuration, starts serving the device's
//! resources and then registers them with the configured resource directory.

use anyhow::Result;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pulse_oximeter::core::{Config, DeviceServer, TransportService, config::LoggingConfig};
use pulse_oximeter::domains::directory::RegistrarState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // A malformed resource tree is fatal before anything is served
    let server = DeviceServer::new(config.clone())?;

    // Resources must be reachable before they are advertised
    let running = TransportService::new(config.transport.clone())
        .start(server.clone())
        .await?;

    match server.directory_client() {
        Ok(Some(client)) => {
            let server = server.clone();
            tokio::spawn(async move {
                let report = server.register_with(client).await;
                match report.state {
                    RegistrarState::Done => info!(
                        "Registered {} resource(s) with the directory",
                        report.registered_count()
                    ),
                    _ => warn!(
                        "Registration incomplete ({} fault(s)); still serving reads",
                        report.faults.len()
                    ),
                }
            });
        }
        Ok(None) => info!("Directory registration disabled"),
        Err(e) => error!("Cannot register with the directory: {}", e),
    }

    tokio::select! {
        result = running.wait() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
