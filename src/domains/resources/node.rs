//! A single addressable resource.

use std::fmt;
use std::sync::Arc;

use super::handlers::{ReadHandler, ReadPayload};
use super::link::{ContentFormat, Link};

/// One node of the resource hierarchy.
///
/// Leaves carry a [`ReadHandler`]; branches group children and cannot be read.
/// Nodes are assembled with the builder methods and then frozen inside a
/// [`ResourceTree`](super::ResourceTree).
#[derive(Clone)]
pub struct ResourceNode {
    segment: String,
    title: String,
    content_format: Option<ContentFormat>,
    resource_type: Option<String>,
    interface: Option<String>,
    children: Vec<ResourceNode>,
    handler: Option<ReadHandler>,
}

impl ResourceNode {
    /// Create a grouping node without a read handler.
    pub fn branch(segment: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            title: title.into(),
            content_format: None,
            resource_type: None,
            interface: None,
            children: Vec::new(),
            handler: None,
        }
    }

    /// Create a readable node.
    pub fn leaf<F>(segment: impl Into<String>, title: impl Into<String>, handler: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            handler: Some(Arc::new(handler)),
            ..Self::branch(segment, title)
        }
    }

    /// Advertise a content format (`ct`).
    pub fn with_content_format(mut self, format: ContentFormat) -> Self {
        self.content_format = Some(format);
        self
    }

    /// Advertise a resource type (`rt`).
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Advertise an interface description (`if`).
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Append a child. Sibling uniqueness is checked when the tree is built.
    pub fn with_child(mut self, child: ResourceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content_format(&self) -> Option<ContentFormat> {
        self.content_format
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[ResourceNode] {
        &self.children
    }

    /// Find a direct child by segment.
    pub fn child(&self, segment: &str) -> Option<&ResourceNode> {
        self.children.iter().find(|c| c.segment == segment)
    }

    /// Whether this node can be read.
    pub fn is_readable(&self) -> bool {
        self.handler.is_some()
    }

    /// Invoke the read handler, if any.
    pub fn read(&self) -> Option<ReadPayload> {
        self.handler.as_ref().map(|h| ReadPayload::text(h()))
    }

    /// Describe this node as a link to `path`.
    ///
    /// Parameters are written in the order `ct`, `rt`, `if`, then `title` when
    /// `with_title` is set.
    pub fn link(&self, path: &str, with_title: bool) -> Link {
        let mut link = Link::new(path);
        if let Some(ct) = self.content_format {
            link = link.with_token("ct", ct);
        }
        if let Some(rt) = &self.resource_type {
            link = link.with_quoted("rt", rt.as_str());
        }
        if let Some(interface) = &self.interface {
            link = link.with_quoted("if", interface.as_str());
        }
        if with_title && !self.title.is_empty() {
            link = link.with_quoted("title", self.title.as_str());
        }
        link
    }
}

impl fmt::Debug for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceNode")
            .field("segment", &self.segment)
            .field("title", &self.title)
            .field("content_format", &self.content_format)
            .field("resource_type", &self.resource_type)
            .field("interface", &self.interface)
            .field("children", &self.children)
            .field("readable", &self.is_readable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_reads_handler_output() {
        let node = ResourceNode::leaf("answer", "Answer", || "42".to_string());
        assert!(node.is_readable());

        let payload = node.read().unwrap();
        assert_eq!(payload.content, "42");
        assert_eq!(payload.content_format, ContentFormat::TEXT_PLAIN);
    }

    #[test]
    fn test_branch_has_no_payload() {
        let node = ResourceNode::branch("group", "Group");
        assert!(!node.is_readable());
        assert!(node.read().is_none());
    }

    #[test]
    fn test_child_lookup_keeps_order() {
        let node = ResourceNode::branch("root", "Root")
            .with_child(ResourceNode::branch("b", "B"))
            .with_child(ResourceNode::branch("a", "A"));

        let segments: Vec<_> = node.children().iter().map(|c| c.segment()).collect();
        assert_eq!(segments, vec!["b", "a"]);
        assert_eq!(node.child("a").map(|c| c.title()), Some("A"));
        assert!(node.child("c").is_none());
    }

    #[test]
    fn test_link_attributes() {
        let node = ResourceNode::leaf("t", "Temperature", String::new)
            .with_content_format(ContentFormat::TEXT_PLAIN)
            .with_resource_type("temperature")
            .with_interface("sensor");

        assert_eq!(
            node.link("/dev/t", false).to_string(),
            r#"</dev/t>;ct=0;rt="temperature";if="sensor""#
        );
        assert_eq!(
            node.link("/dev/t", true).to_string(),
            r#"</dev/t>;ct=0;rt="temperature";if="sensor";title="Temperature""#
        );
    }
}
