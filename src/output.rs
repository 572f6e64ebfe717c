//! CLI output formatting.
//!
//! Every entry is displayed by its positional index and title first, with the
//! link target as secondary context. Entries hidden from reading order are
//! still listed in the tree, with a marker explaining why.
//!
//! # Output Format
//!
//! ## Flatten
//!
//! ```text
//! Outline ogmenu-12
//! 001 Overview [placeholder]
//!     /collection/joinup
//! 002 Guide
//!     /collection/joinup/guide
//!     001 Install
//!         /collection/joinup/guide/install
//!
//! Reading order
//! 001 Guide → /collection/joinup/guide
//! 002 Install → /collection/joinup/guide/install
//! ```
//!
//! ## Navigate
//!
//! ```text
//! Previous: Guide → /collection/joinup/guide
//! Up: Guide → /collection/joinup/guide
//! Next: (none)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::menu::StoreProblem;
use crate::navigation::{StripRules, reading_order};
use crate::types::{MenuNode, NavigationResult};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Why an entry is left out of reading order, if it is.
fn hidden_marker(node: &MenuNode, strip: &StripRules) -> Option<&'static str> {
    if node.inaccessible {
        Some("inaccessible")
    } else if strip.matches(node) {
        Some("placeholder")
    } else {
        None
    }
}

fn link_line(label: &str, node: Option<&MenuNode>) -> String {
    match node {
        Some(n) => format!("{}: {} \u{2192} {}", label, n.title, n.url),
        None => format!("{}: (none)", label),
    }
}

// ============================================================================
// Tree walker
// ============================================================================

fn walk_tree(items: &[MenuNode], depth: usize, strip: &StripRules, lines: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        let base_indent = indent(depth);
        let header = match hidden_marker(item, strip) {
            Some(marker) => format!("{} {} [{}]", format_index(i + 1), item.title, marker),
            None => format!("{} {}", format_index(i + 1), item.title),
        };
        lines.push(format!("{}{}", base_indent, header));
        lines.push(format!("{}    {}", base_indent, item.url));
        walk_tree(&item.children, depth + 1, strip, lines);
    }
}

// ============================================================================
// flatten
// ============================================================================

/// Format a menu tree followed by its filtered reading order.
pub fn format_outline(menu_id: &str, tree: &[MenuNode], strip: &StripRules) -> Vec<String> {
    let mut lines = vec![format!("Outline {}", menu_id)];
    walk_tree(tree, 0, strip, &mut lines);

    lines.push(String::new());
    lines.push("Reading order".to_string());
    for (i, node) in reading_order(tree, strip).iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            node.title,
            node.url
        ));
    }
    lines
}

pub fn print_outline(menu_id: &str, tree: &[MenuNode], strip: &StripRules) {
    for line in format_outline(menu_id, tree, strip) {
        println!("{}", line);
    }
}

// ============================================================================
// navigate
// ============================================================================

/// Format previous / up / next, or a single line when there is none.
pub fn format_navigation(nav: &NavigationResult<'_>) -> Vec<String> {
    if nav.is_empty() {
        return vec!["No outline navigation for this page".to_string()];
    }
    vec![
        link_line("Previous", nav.previous),
        link_line("Up", nav.up),
        link_line("Next", nav.next),
    ]
}

pub fn print_navigation(nav: &NavigationResult<'_>) {
    for line in format_navigation(nav) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the result of validating a menu store.
pub fn format_check(menu_count: usize, problems: &[StoreProblem]) -> Vec<String> {
    let mut lines = Vec::new();
    if problems.is_empty() {
        lines.push(format!("{} menus, no problems", menu_count));
        return lines;
    }
    lines.push(format!("{} menus, {} problems", menu_count, problems.len()));
    for problem in problems {
        lines.push(format!("    {}", problem));
    }
    lines
}

pub fn print_check(menu_count: usize, problems: &[StoreProblem]) {
    for line in format_check(menu_count, problems) {
        println!("{}", line);
    }
}
