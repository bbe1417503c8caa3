//! The resource hierarchy and path resolution.

use std::collections::HashSet;

use super::error::ResourceError;
use super::handlers::ReadPayload;
use super::link::{Link, format_links};
use super::node::ResourceNode;

/// An immutable hierarchy of resources rooted at the device node.
///
/// Construction validates that every full path is unique. After that the tree
/// is read-only and can be shared freely between request handlers.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    root: ResourceNode,
}

impl ResourceTree {
    /// Freeze `root` into a tree, rejecting malformed or duplicate segments.
    pub fn new(root: ResourceNode) -> Result<Self, ResourceError> {
        validate(&root, "")?;
        Ok(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &ResourceNode {
        &self.root
    }

    /// Walk `segments` from the root. The first segment names the root itself.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<&ResourceNode, ResourceError> {
        let not_found = || ResourceError::not_found(join_path(segments));

        let (first, rest) = segments.split_first().ok_or_else(not_found)?;
        if first.as_ref() != self.root.segment() {
            return Err(not_found());
        }

        rest.iter().try_fold(&self.root, |node, segment| {
            node.child(segment.as_ref()).ok_or_else(not_found)
        })
    }

    /// Resolve a slash-separated path such as `/pulseoximeter/heartrate`.
    ///
    /// Empty segments are ignored, so leading and trailing slashes do not matter.
    pub fn resolve_path(&self, path: &str) -> Result<&ResourceNode, ResourceError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.resolve(&segments)
    }

    /// Resolve `path` and read the node found there.
    pub fn read(&self, path: &str) -> Result<ReadPayload, ResourceError> {
        let node = self.resolve_path(path)?;
        handle_read(node, path)
    }

    /// Every node with its full path, depth-first in insertion order.
    pub fn nodes(&self) -> Vec<(String, &ResourceNode)> {
        let mut out = Vec::new();
        collect(&self.root, "", &mut out);
        out
    }

    /// Readable nodes with their full paths, in insertion order.
    pub fn leaves(&self) -> Vec<(String, &ResourceNode)> {
        self.nodes()
            .into_iter()
            .filter(|(_, node)| node.is_readable())
            .collect()
    }

    /// The device's own `/.well-known/core` document.
    pub fn core_listing(&self) -> String {
        let links: Vec<Link> = self
            .nodes()
            .into_iter()
            .map(|(path, node)| node.link(&path, true))
            .collect();
        format_links(&links)
    }
}

/// Read `node`, failing for branches. `path` is only used for the error.
pub fn handle_read(node: &ResourceNode, path: &str) -> Result<ReadPayload, ResourceError> {
    node.read().ok_or_else(|| ResourceError::unsupported(path))
}

fn validate(node: &ResourceNode, parent: &str) -> Result<(), ResourceError> {
    let segment = node.segment();
    if segment.is_empty() || segment.contains('/') {
        return Err(ResourceError::InvalidSegment(segment.to_string()));
    }

    let path = format!("{}/{}", parent, segment);
    let mut seen = HashSet::new();
    for child in node.children() {
        if !seen.insert(child.segment()) {
            return Err(ResourceError::DuplicateSegment {
                parent: path.clone(),
                segment: child.segment().to_string(),
            });
        }
        validate(child, &path)?;
    }
    Ok(())
}

fn collect<'a>(node: &'a ResourceNode, parent: &str, out: &mut Vec<(String, &'a ResourceNode)>) {
    let path = format!("{}/{}", parent, node.segment());
    out.push((path.clone(), node));
    for child in node.children() {
        collect(child, &path, out);
    }
}

fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(segment.as_ref());
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ResourceTree {
        let root = ResourceNode::branch("dev", "Device")
            .with_child(ResourceNode::leaf("a", "A", || "alpha".to_string()))
            .with_child(
                ResourceNode::branch("group", "Group")
                    .with_child(ResourceNode::leaf("b", "B", || "beta".to_string())),
            );
        ResourceTree::new(root).unwrap()
    }

    #[test]
    fn test_resolve_nested() {
        let tree = sample_tree();
        let node = tree.resolve(&["dev", "group", "b"]).unwrap();
        assert_eq!(node.title(), "B");
        assert_eq!(tree.resolve(&["dev"]).unwrap().segment(), "dev");
    }

    #[test]
    fn test_resolve_unknown_segments() {
        let tree = sample_tree();
        assert!(matches!(
            tree.resolve(&["dev", "missing"]),
            Err(ResourceError::PathNotFound(p)) if p == "/dev/missing"
        ));
        assert!(matches!(
            tree.resolve(&["other", "a"]),
            Err(ResourceError::PathNotFound(_))
        ));
        assert!(matches!(
            tree.resolve::<&str>(&[]),
            Err(ResourceError::PathNotFound(p)) if p == "/"
        ));
    }

    #[test]
    fn test_resolve_path_ignores_extra_slashes() {
        let tree = sample_tree();
        assert_eq!(tree.resolve_path("/dev/a").unwrap().title(), "A");
        assert_eq!(tree.resolve_path("dev/group/b/").unwrap().title(), "B");
        assert!(tree.resolve_path("").is_err());
    }

    #[test]
    fn test_read_leaf_and_branch() {
        let tree = sample_tree();
        assert_eq!(tree.read("/dev/group/b").unwrap().content, "beta");
        assert!(matches!(
            tree.read("/dev/group"),
            Err(ResourceError::UnsupportedOperation(p)) if p == "/dev/group"
        ));
    }

    #[test]
    fn test_duplicate_siblings_rejected() {
        let root = ResourceNode::branch("dev", "Device")
            .with_child(ResourceNode::branch("x", "X1"))
            .with_child(ResourceNode::branch("x", "X2"));

        let err = ResourceTree::new(root).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(
            err,
            ResourceError::DuplicateSegment { ref parent, ref segment }
                if parent == "/dev" && segment == "x"
        ));
    }

    #[test]
    fn test_same_segment_under_different_parents_allowed() {
        let root = ResourceNode::branch("dev", "Device")
            .with_child(ResourceNode::branch("a", "A").with_child(ResourceNode::branch("x", "X")))
            .with_child(ResourceNode::branch("b", "B").with_child(ResourceNode::branch("x", "X")));
        assert!(ResourceTree::new(root).is_ok());
    }

    #[test]
    fn test_invalid_segments_rejected() {
        let slash = ResourceNode::branch("dev", "Device").with_child(ResourceNode::branch("a/b", "AB"));
        assert!(matches!(
            ResourceTree::new(slash),
            Err(ResourceError::InvalidSegment(_))
        ));
        assert!(matches!(
            ResourceTree::new(ResourceNode::branch("", "Empty")),
            Err(ResourceError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_leaves_in_insertion_order() {
        let tree = sample_tree();
        let paths: Vec<_> = tree.leaves().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["/dev/a", "/dev/group/b"]);
    }

    #[test]
    fn test_core_listing() {
        let tree = sample_tree();
        assert_eq!(
            tree.core_listing(),
            r#"</dev>;title="Device",</dev/a>;title="A",</dev/group>;title="Group",</dev/group/b>;title="B""#
        );
    }
}
