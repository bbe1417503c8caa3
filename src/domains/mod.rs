//! Domains module containing business logic organized by bounded contexts.
//!
//! - **sensors**: fabricated vital-sign readings
//! - **resources**: the tree of addressable resources the device serves
//! - **directory**: registration of those resources with a resource directory

pub mod directory;
pub mod resources;
pub mod sensors;
