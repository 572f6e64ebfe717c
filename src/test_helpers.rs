//! Shared test utilities for the toc-outline test suite.
//!
//! Provides terse menu builders and extractors so navigation tests read like
//! the outlines they describe.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! // A ─┬─ B
//! //    └─ C ── D
//! let tree = abcd_tree();
//! assert_eq!(ids(&flatten(&tree)), vec!["a", "b", "c", "d"]);
//!
//! let overview = node("o").titled("Overview").with_route("entity.rdf_entity.canonical");
//! ```

use crate::types::MenuNode;

// =========================================================================
// Builders
// =========================================================================

/// A menu entry titled with the uppercased id and linking to `/{id}`.
pub fn node(id: &str) -> MenuNode {
    MenuNode::new(id, id.to_uppercase(), format!("/{id}"))
}

impl MenuNode {
    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

/// `A(B, C(D))`: the canonical four-entry outline.
pub fn abcd_tree() -> Vec<MenuNode> {
    vec![node("a").with_children(vec![node("b"), node("c").with_children(vec![node("d")])])]
}

// =========================================================================
// Extractors
// =========================================================================

/// Ids of a sequence of entries, in order.
pub fn ids<'a>(entries: &[&'a MenuNode]) -> Vec<&'a str> {
    entries.iter().map(|n| n.id.as_str()).collect()
}

/// Id of an optional entry.
pub fn id_of(entry: Option<&MenuNode>) -> Option<&str> {
    entry.map(|n| n.id.as_str())
}
