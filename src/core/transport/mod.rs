//! Transport layer for the device server.
//!
//! The device is served over HTTP:
//! - `GET /<device>/<resource>` reads a sensor resource as plain text
//! - `GET /.well-known/core` lists the device's resources in link-format
//! - `GET /health` reports liveness
//!
//! The transport handles the connection lifecycle and delegates resource
//! resolution and reads to the [`DeviceServer`](crate::core::DeviceServer).

mod config;
mod error;
pub mod http;
mod service;

pub use config::{HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::{RunningTransport, TransportService};
