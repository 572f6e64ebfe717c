//! The outline block: previous / up / next links for one page request.
//!
//! A request goes through two steps:
//!
//! 1. [`RequestContext::resolve`] asks the collaborators once for everything
//!    the block needs (menu id, tree, active link) and fails early when the
//!    container has no menu.
//! 2. [`build_block`] runs the navigator over that context and decorates the
//!    result into links, cache tags and cache contexts.
//!
//! The context is plain data, so one resolved request can be built, cached
//! and rendered without touching the collaborators again.

use crate::config::OutlineConfig;
use crate::menu::{ActiveLinkResolver, MenuError, MenuIdentityResolver, MenuTreeSupplier};
use crate::navigation::compute_navigation;
use crate::types::MenuNode;
use maud::html;
use thiserror::Error;
use tracing::debug;

/// Cache context every outline block varies by.
pub const URL_PATH_CONTEXT: &str = "url.path";

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("no outline menu found for container '{0}'")]
    MenuNotFound(String),
    #[error("menu error: {0}")]
    Menu(#[from] MenuError),
}

/// Everything one request needs, resolved up front.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub path: String,
    pub menu_instance: String,
    pub menu_id: String,
    pub tree: Vec<MenuNode>,
    pub active_id: Option<String>,
}

impl RequestContext {
    pub fn resolve(
        container: &str,
        path: &str,
        config: &OutlineConfig,
        identity: &impl MenuIdentityResolver,
        supplier: &impl MenuTreeSupplier,
        active: &impl ActiveLinkResolver,
    ) -> Result<Self, BlockError> {
        let menu_instance = identity
            .menu_instance(container)
            .ok_or_else(|| BlockError::MenuNotFound(container.to_string()))?;
        let menu_id = config.menu_id(&menu_instance);
        let tree = supplier.tree(&menu_id)?;
        let active_id = active.active_id(&menu_id);
        debug!(container, path, %menu_id, ?active_id, "resolved outline request");

        Ok(Self {
            path: path.to_string(),
            menu_instance,
            menu_id,
            tree,
            active_id,
        })
    }

    /// Key under which the rendered block is memoized.
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.path, self.menu_id)
    }
}

/// Position of a link relative to the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRel {
    Prev,
    Up,
    Next,
}

impl LinkRel {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkRel::Prev => "prev",
            LinkRel::Up => "up",
            LinkRel::Next => "next",
        }
    }
}

/// A rendered-ready navigation link. `title_html` is already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLink {
    pub rel: LinkRel,
    pub url: String,
    pub title_html: String,
}

/// Output of [`build_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBuild {
    /// In display order: prev, up, next. Missing ones are skipped.
    pub links: Vec<OutlineLink>,
    pub cache_tags: Vec<String>,
    pub cache_contexts: Vec<String>,
}

impl BlockBuild {
    fn empty() -> Self {
        Self {
            links: Vec::new(),
            cache_tags: Vec::new(),
            cache_contexts: vec![URL_PATH_CONTEXT.to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn link(&self, rel: LinkRel) -> Option<&OutlineLink> {
        self.links.iter().find(|l| l.rel == rel)
    }
}

/// Tags that invalidate a block when its menu config or menu instance changes.
pub fn cache_tags(menu_id: &str, menu_instance: &str) -> Vec<String> {
    vec![
        format!("config:system.menu.{menu_id}"),
        format!("ogmenu_instance:{menu_instance}"),
    ]
}

/// Build the outline links for a resolved request.
///
/// Without an active link there is nothing relative to link to, so the block
/// is empty and carries no tags.
pub fn build_block(ctx: &RequestContext, config: &OutlineConfig) -> BlockBuild {
    let Some(active_id) = ctx.active_id.as_deref() else {
        debug!(path = %ctx.path, menu_id = %ctx.menu_id, "no active link");
        return BlockBuild::empty();
    };

    let nav = compute_navigation(&ctx.tree, active_id, &config.strip);
    let links_config = &config.links;
    let mut links = Vec::new();

    if let Some(prev) = nav.previous {
        links.push(OutlineLink {
            rel: LinkRel::Prev,
            url: prev.url.clone(),
            title_html: html! { span class=(links_config.previous_icon) {} (prev.title) }
                .into_string(),
        });
    }
    if let Some(up) = nav.up {
        links.push(OutlineLink {
            rel: LinkRel::Up,
            url: up.url.clone(),
            title_html: html! { (links_config.up_label) }.into_string(),
        });
    }
    if let Some(next) = nav.next {
        links.push(OutlineLink {
            rel: LinkRel::Next,
            url: next.url.clone(),
            title_html: html! { (next.title) span class=(links_config.next_icon) {} }
                .into_string(),
        });
    }

    BlockBuild {
        links,
        cache_tags: cache_tags(&ctx.menu_id, &ctx.menu_instance),
        cache_contexts: vec![URL_PATH_CONTEXT.to_string()],
    }
}
