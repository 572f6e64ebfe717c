//! Collaborators that feed the navigator: menu trees, active links, and the
//! container → menu mapping.
//!
//! The traits are the seams; [`MenuStore`] and [`UrlActiveTrail`] are the
//! implementations used by the CLI. A store is a JSON document:
//!
//! ```json
//! {
//!   "containers": { "collection/joinup": "12" },
//!   "menus": {
//!     "ogmenu-12": [
//!       { "id": "menu_link_content:1", "title": "Overview", "url": "/collection/joinup",
//!         "route_name": "entity.rdf_entity.canonical" },
//!       { "id": "menu_link_content:2", "title": "Guide", "url": "/collection/joinup/guide",
//!         "children": [ ... ] }
//!     ]
//!   }
//! }
//! ```
//!
//! Trees are expected in display order with access already evaluated;
//! inaccessible entries carry `"inaccessible": true`.

use crate::navigation::flatten;
use crate::types::MenuNode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown menu: {0}")]
    UnknownMenu(String),
}

/// Supplies the sorted, access-tagged tree of a menu.
pub trait MenuTreeSupplier {
    fn tree(&self, menu_id: &str) -> Result<Vec<MenuNode>, MenuError>;
}

/// Supplies the id of the active entry of a menu, if any.
pub trait ActiveLinkResolver {
    fn active_id(&self, menu_id: &str) -> Option<String>;
}

/// Maps a group container to the id of its menu instance.
pub trait MenuIdentityResolver {
    fn menu_instance(&self, container: &str) -> Option<String>;
}

/// Menu trees and container mappings loaded from a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuStore {
    /// Container id → menu instance id.
    #[serde(default)]
    pub containers: BTreeMap<String, String>,
    /// Menu id → tree.
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<MenuNode>>,
}

impl MenuStore {
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Borrow a tree without cloning it.
    pub fn get(&self, menu_id: &str) -> Option<&[MenuNode]> {
        self.menus.get(menu_id).map(Vec::as_slice)
    }
}

impl MenuTreeSupplier for MenuStore {
    fn tree(&self, menu_id: &str) -> Result<Vec<MenuNode>, MenuError> {
        self.get(menu_id)
            .map(<[MenuNode]>::to_vec)
            .ok_or_else(|| MenuError::UnknownMenu(menu_id.to_string()))
    }
}

impl MenuIdentityResolver for MenuStore {
    fn menu_instance(&self, container: &str) -> Option<String> {
        self.containers.get(container).cloned()
    }
}

/// Active link lookup for one request path.
///
/// The active entry is the first entry, in reading order, whose URL equals
/// the request path. Entries are matched regardless of access so that an
/// inaccessible active page still resolves (and then yields no navigation).
pub struct UrlActiveTrail<'a, S> {
    supplier: &'a S,
    path: String,
}

impl<'a, S: MenuTreeSupplier> UrlActiveTrail<'a, S> {
    pub fn new(supplier: &'a S, path: impl Into<String>) -> Self {
        Self {
            supplier,
            path: path.into(),
        }
    }
}

impl<S: MenuTreeSupplier> ActiveLinkResolver for UrlActiveTrail<'_, S> {
    fn active_id(&self, menu_id: &str) -> Option<String> {
        let tree = self.supplier.tree(menu_id).ok()?;
        flatten(&tree)
            .into_iter()
            .find(|node| node.url == self.path)
            .map(|node| node.id.clone())
    }
}

/// A problem found by [`check_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProblem {
    DuplicateId { menu_id: String, id: String },
    MissingMenu { container: String, menu_id: String },
}

impl std::fmt::Display for StoreProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreProblem::DuplicateId { menu_id, id } => {
                write!(f, "{menu_id}: duplicate link id '{id}'")
            }
            StoreProblem::MissingMenu { container, menu_id } => {
                write!(f, "{container}: menu '{menu_id}' does not exist")
            }
        }
    }
}

/// Validate a store: ids unique per menu, every container's menu present.
///
/// `menu_id` maps a menu instance id to the menu id (see
/// [`crate::config::OutlineConfig::menu_id`]).
pub fn check_store(store: &MenuStore, menu_id: impl Fn(&str) -> String) -> Vec<StoreProblem> {
    let mut problems = Vec::new();

    for (id, tree) in &store.menus {
        let mut seen = HashSet::new();
        for node in flatten(tree) {
            if !seen.insert(node.id.as_str()) {
                problems.push(StoreProblem::DuplicateId {
                    menu_id: id.clone(),
                    id: node.id.clone(),
                });
            }
        }
    }

    for (container, instance) in &store.containers {
        let expected = menu_id(instance);
        if !store.menus.contains_key(&expected) {
            problems.push(StoreProblem::MissingMenu {
                container: container.clone(),
                menu_id: expected,
            });
        }
    }

    problems
}
