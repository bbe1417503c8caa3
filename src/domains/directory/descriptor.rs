//! Registration descriptors.

use crate::domains::resources::{ContentFormat, Link, ResourceNode, ResourceTree};

/// The attributes advertised for one resource during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDescriptor {
    /// Full path of the resource on the device, e.g. `/pulseoximeter/heartrate`.
    pub resource_path: String,

    /// Content format advertised as `ct`.
    pub content_format: ContentFormat,

    /// Resource type advertised as `rt`.
    pub resource_type: String,

    /// Interface description advertised as `if`.
    pub interface: String,
}

impl RegistrationDescriptor {
    /// Describe the node found at `path`.
    ///
    /// Nodes without explicit attributes advertise plain text, their title as
    /// resource type, and no interface.
    pub fn for_node(path: impl Into<String>, node: &ResourceNode) -> Self {
        Self {
            resource_path: path.into(),
            content_format: node.content_format().unwrap_or(ContentFormat::TEXT_PLAIN),
            resource_type: node.resource_type().unwrap_or(node.title()).to_string(),
            interface: node.interface().unwrap_or_default().to_string(),
        }
    }

    /// Endpoint name sent to the directory: the path without its leading
    /// slash, terminated by one (`pulseoximeter/heartrate/`).
    pub fn endpoint(&self) -> String {
        format!("{}/", self.resource_path.trim_matches('/'))
    }

    /// The descriptor as a link.
    pub fn to_link(&self) -> Link {
        let link = Link::new(&self.resource_path)
            .with_token("ct", self.content_format)
            .with_quoted("rt", self.resource_type.as_str());
        if self.interface.is_empty() {
            link
        } else {
            link.with_quoted("if", self.interface.as_str())
        }
    }

    /// The link-format request body.
    pub fn to_link_format(&self) -> String {
        self.to_link().to_string()
    }
}

/// Descriptors for every readable resource, in the order they were attached.
pub fn descriptors_for(tree: &ResourceTree) -> Vec<RegistrationDescriptor> {
    tree.leaves()
        .into_iter()
        .map(|(path, node)| RegistrationDescriptor::for_node(path, node))
        .collect()
}
