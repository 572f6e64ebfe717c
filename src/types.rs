//! Shared types used across the navigator, the block builder and the CLI.
//!
//! Menu trees arrive as JSON (see [`crate::menu::MenuStore`]) and are
//! deserialized straight into [`MenuNode`]s, so the serde shape here is the
//! on-disk shape of a menu document.

use serde::{Deserialize, Serialize};

/// A single entry of a group's table-of-contents menu.
///
/// The tree is owned and acyclic: children live inside their parent, and a
/// node's `id` is unique within the menu it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Route that produced the link. Used to recognise auto-generated
    /// placeholder entries ("Overview", "Members", "About").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    /// The current actor cannot view the target. Such links stay in the tree
    /// but never surface as navigation targets.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inaccessible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            route_name: None,
            inaccessible: false,
            children: Vec::new(),
        }
    }

    pub fn with_route(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    pub fn inaccessible(mut self) -> Self {
        self.inaccessible = true;
        self
    }
}

/// Links found relative to the active entry.
///
/// All three fields are `None` when the active entry could not be located;
/// callers render nothing in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationResult<'a> {
    pub previous: Option<&'a MenuNode>,
    pub up: Option<&'a MenuNode>,
    pub next: Option<&'a MenuNode>,
}

impl NavigationResult<'_> {
    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.up.is_none() && self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_node_deserializes_with_defaults() {
        let node: MenuNode =
            serde_json::from_str(r#"{"id": "a", "title": "A", "url": "/a"}"#).unwrap();
        assert_eq!(node.route_name, None);
        assert!(!node.inaccessible);
        assert!(node.children.is_empty());
    }

    #[test]
    fn menu_node_skips_default_fields_when_serialized() {
        let json = serde_json::to_string(&MenuNode::new("a", "A", "/a")).unwrap();
        assert_eq!(json, r#"{"id":"a","title":"A","url":"/a"}"#);
    }

    #[test]
    fn nested_children_deserialize_in_order() {
        let node: MenuNode = serde_json::from_str(
            r#"{"id": "a", "title": "A", "url": "/a", "children": [
                {"id": "b", "title": "B", "url": "/b"},
                {"id": "c", "title": "C", "url": "/c", "inaccessible": true}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<&str> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(node.children[1].inaccessible);
    }

    #[test]
    fn default_navigation_result_is_empty() {
        assert!(NavigationResult::default().is_empty());
    }
}
