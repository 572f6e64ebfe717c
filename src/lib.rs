//! # toc-outline
//!
//! Previous / up / next links for pages inside a table-of-contents outline.
//!
//! A group's outline is a menu tree. Reading it top to bottom, parents before
//! children, gives the order in which a visitor pages through the content.
//! For the page being viewed this crate finds the entry before it, the entry
//! after it, and the entry it hangs under.
//!
//! # Pipeline
//!
//! ```text
//! container + path ─→ RequestContext ─→ NavigationResult ─→ BlockBuild ─→ HTML
//!                     (menu, tree,      (prev / up / next)  (links, tags)
//!                      active link)
//! ```
//!
//! The navigator in the middle is a pure function over an in-memory tree.
//! Fetching the tree and the active link is done once per request by
//! [`block::RequestContext::resolve`] through the seams in [`menu`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`navigation`] | Flattening, placeholder stripping, prev/up/next resolution |
//! | [`menu`] | Collaborator traits and the JSON-backed [`menu::MenuStore`] |
//! | [`block`] | Request context, decorated links, cache tags |
//! | [`render`] | HTML for a block, using Maud |
//! | [`cache`] | Fingerprinted memoization of rendered blocks |
//! | [`config`] | `outline.toml` loading, merging, and validation |
//! | [`types`] | `MenuNode` and `NavigationResult` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Placeholders Are Skipped, Not Removed
//!
//! Group menus start with generated links ("Overview", "Members", "About").
//! They make poor prev/next targets, so they are dropped from reading order,
//! but a page nested under one still reports it as "Up". A placeholder is
//! recognised by route name and exact title together: renaming the link
//! turns it into regular content.
//!
//! ## Missing Active Link Means No Links
//!
//! If the active page is not in reading order (unknown, inaccessible, or a
//! placeholder) the navigator returns an empty result instead of an error.
//! Callers render nothing.

pub mod block;
pub mod cache;
pub mod config;
pub mod menu;
pub mod navigation;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
