//! Pulse Oximeter Device Library
//!
//! This crate simulates a networked pulse oximeter. It serves heart-rate and
//! oxygen-saturation readings as addressable resources and registers those
//! resources with a resource directory so other clients can discover them.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server runtime and its transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **sensors**: Fabricated vital-sign readings
//!   - **resources**: The tree of addressable resources and link-format descriptions
//!   - **directory**: Registration with a resource directory
//!
//! # Example
//!
//! ```rust,no_run
//! use pulse_oximeter::core::{Config, DeviceServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = DeviceServer::new(config.clone())?;
//!     let running = TransportService::new(config.transport).start(server.clone()).await?;
//!     if let Some(client) = server.directory_client()? {
//!         let report = server.register_with(client).await;
//!         println!("registered {} resource(s)", report.registered_count());
//!     }
//!     running.wait().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, DeviceServer, Error, Result};
