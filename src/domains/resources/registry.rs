//! Resource Registry - assembly of the device's resource tree.
//!
//! When adding a new sensor resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Attach it here in `build_device_tree()`
//!
//! Leaves are registered with the directory in the order they are attached.

use std::sync::Arc;

use super::definitions::{HeartRateResource, OxygenSaturationResource, ResourceDefinition};
use super::error::ResourceError;
use super::node::ResourceNode;
use super::tree::ResourceTree;
use crate::domains::sensors::RandomSource;

/// Segment of the device node at the root of the tree.
pub const DEVICE_SEGMENT: &str = "pulseoximeter";

/// Title of the device node.
pub const DEVICE_TITLE: &str = "Pulse Oximeter";

/// Helper function to create a leaf node from a definition.
fn build_leaf<R: ResourceDefinition + 'static>(source: Arc<dyn RandomSource>) -> ResourceNode {
    ResourceNode::leaf(R::SEGMENT, R::TITLE, move || R::read(source.as_ref()))
        .with_content_format(R::CONTENT_FORMAT)
        .with_resource_type(R::RESOURCE_TYPE)
        .with_interface(R::INTERFACE)
}

/// Build the pulse oximeter tree, drawing readings from `source`.
pub fn build_device_tree(source: Arc<dyn RandomSource>) -> Result<ResourceTree, ResourceError> {
    let device = ResourceNode::branch(DEVICE_SEGMENT, DEVICE_TITLE)
        .with_child(build_leaf::<HeartRateResource>(source.clone()))
        .with_child(build_leaf::<OxygenSaturationResource>(source));

    ResourceTree::new(device)
}
