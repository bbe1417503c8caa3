//! Resources domain module.
//!
//! This module models the data the device exposes as a tree of addressable
//! resources rooted at the device node (`/pulseoximeter`). Leaves carry read
//! handlers; branches only group children.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual sensor resources (one file per resource)
//! - `registry.rs` - Assembly of the device tree
//! - `node.rs` / `tree.rs` - The resource model and path resolution
//! - `link.rs` - Link-format serialization and parsing
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` (e.g., `temperature.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Attach in `registry.rs`

pub mod definitions;
mod error;
mod handlers;
pub mod link;
mod node;
mod registry;
mod tree;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use handlers::{ReadHandler, ReadPayload};
pub use link::{ContentFormat, Link, LinkFormatError, LinkParam};
pub use node::ResourceNode;
pub use registry::{DEVICE_SEGMENT, DEVICE_TITLE, build_device_tree};
pub use tree::{ResourceTree, handle_read};
