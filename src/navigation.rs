//! Previous / up / next resolution over a table-of-contents menu.
//!
//! # Reading Order
//!
//! A menu tree is read the way a book outline is: a parent comes before its
//! children, and children keep the order the menu gives them. Flattening the
//! tree in pre-order therefore yields the sequence a reader walks with
//! "previous" and "next":
//!
//! ```text
//! A                    [A, B, C, D]
//! ├── B
//! └── C
//!     └── D
//! ```
//!
//! Two kinds of entries are dropped from that sequence before neighbours are
//! looked up:
//!
//! - **Placeholders**: auto-generated links such as "Overview" or "Members",
//!   recognised by route name *and* exact title through [`StripRules`].
//! - **Inaccessible links**: entries the current actor cannot view.
//!
//! # Parent Lookup
//!
//! "Up" is resolved against the unfiltered tree. A placeholder hidden from
//! previous/next is still a valid structural parent, and the resolved parent
//! is reported as-is without being filtered again.
//!
//! Everything here is a pure function of its inputs: fetching the tree and
//! the active link is the caller's job (see [`crate::block`]).

use crate::types::{MenuNode, NavigationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Route name → exact title of placeholder links to hide from reading order.
///
/// A link is only hidden when both match, so a renamed "Overview" link stays
/// navigable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StripRules(BTreeMap<String, String>);

impl StripRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, route_name: impl Into<String>, title: impl Into<String>) -> Self {
        self.0.insert(route_name.into(), title.into());
        self
    }

    /// Whether `node` is a placeholder under these rules.
    pub fn matches(&self, node: &MenuNode) -> bool {
        node.route_name
            .as_deref()
            .and_then(|route| self.0.get(route))
            .is_some_and(|title| *title == node.title)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(r, t)| (r.as_str(), t.as_str()))
    }
}

/// Flatten a menu forest in pre-order: parents first, children in order.
pub fn flatten(tree: &[MenuNode]) -> Vec<&MenuNode> {
    let mut entries = Vec::new();
    flatten_into(tree, &mut entries);
    entries
}

fn flatten_into<'a>(tree: &'a [MenuNode], entries: &mut Vec<&'a MenuNode>) {
    for node in tree {
        entries.push(node);
        flatten_into(&node.children, entries);
    }
}

/// Drop placeholders and inaccessible links from a flattened sequence.
///
/// Idempotent: filtering an already-filtered sequence returns it unchanged.
pub fn filter_reading_order<'a>(entries: &[&'a MenuNode], strip: &StripRules) -> Vec<&'a MenuNode> {
    entries
        .iter()
        .copied()
        .filter(|node| !strip.matches(node))
        .filter(|node| !node.inaccessible)
        .collect()
}

/// Flattened and filtered sequence used for previous/next.
pub fn reading_order<'a>(tree: &'a [MenuNode], strip: &StripRules) -> Vec<&'a MenuNode> {
    filter_reading_order(&flatten(tree), strip)
}

/// Find the node whose children directly contain `active_id`.
///
/// Each level is checked before descending into it. Root entries and unknown
/// ids have no parent. With duplicate ids the first match in that order
/// wins.
pub fn find_parent<'a>(tree: &'a [MenuNode], active_id: &str) -> Option<&'a MenuNode> {
    find_parent_in(tree, active_id, None)
}

fn find_parent_in<'a>(
    tree: &'a [MenuNode],
    active_id: &str,
    parent: Option<&'a MenuNode>,
) -> Option<&'a MenuNode> {
    if tree.iter().any(|node| node.id == active_id) {
        return parent;
    }
    tree.iter()
        .find_map(|node| find_parent_in(&node.children, active_id, Some(node)))
}

/// Resolve previous, up and next for `active_id`.
///
/// If the active entry is missing from the filtered reading order (unknown
/// id, inaccessible, or a placeholder) the result is entirely empty.
pub fn compute_navigation<'a>(
    tree: &'a [MenuNode],
    active_id: &str,
    strip: &StripRules,
) -> NavigationResult<'a> {
    let order = reading_order(tree, strip);
    let Some(pos) = order.iter().position(|node| node.id == active_id) else {
        debug!(active_id, entries = order.len(), "active link not in reading order");
        return NavigationResult::default();
    };

    let result = NavigationResult {
        previous: pos.checked_sub(1).map(|i| order[i]),
        up: find_parent(tree, active_id),
        next: order.get(pos + 1).copied(),
    };
    debug!(
        active_id,
        previous = result.previous.map(|n| n.id.as_str()),
        up = result.up.map(|n| n.id.as_str()),
        next = result.next.map(|n| n.id.as_str()),
        "resolved outline navigation"
    );
    result
}
