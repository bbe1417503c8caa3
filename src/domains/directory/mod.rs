//! Directory domain module.
//!
//! This module advertises the device's resources to an external resource
//! directory: it builds link-format registration descriptors and drives the
//! discover / register / verify handshake.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - Registration descriptors and their link-format bodies
//! - `client.rs` - The `DirectoryClient` seam and its HTTP implementation
//! - `registrar.rs` - The registration state machine
//! - `error.rs` - Directory-specific error types

mod client;
mod descriptor;
mod error;
mod registrar;

pub use client::{
    DISCOVERY_PATH, DirectoryClient, DiscoveryOutcome, HttpDirectoryClient,
    LINK_FORMAT_MEDIA_TYPE, REGISTRATION_PATH, RegistrationResponse, parse_listing,
};
pub use descriptor::{RegistrationDescriptor, descriptors_for};
pub use error::{DirectoryError, DirectoryResult};
pub use registrar::{
    RegistrarState, Registrar, RegistrationOutcome, RegistrationReport, RegistrationStep,
    ResourceRegistration, StepFault, StepWarning,
};
