//! Memoization of rendered outline blocks.
//!
//! Building a block is cheap, but fetching the menu tree that feeds it is
//! not. This module lets a caller skip rendering when nothing the block
//! depends on has changed since it was last rendered.
//!
//! # Design
//!
//! ## Cache keys
//!
//! Entries are keyed by request path and menu id (`"{path}|{menu_id}"`, see
//! [`RequestContext::cache_key`](crate::block::RequestContext::cache_key)).
//! A hit additionally requires a matching **fingerprint**: SHA-256 of the
//! serialized menu tree, the strip rules and the link decoration. Editing
//! the menu, or the config that shapes the links, changes the fingerprint
//! and the stale entry is re-rendered.
//!
//! ## Tags
//!
//! Each entry stores the cache tags of its block. [`NavigationCache::invalidate_tag`]
//! drops every entry carrying a tag, which is how a change to one menu
//! instance clears all pages of that group at once.
//!
//! ## Storage
//!
//! The cache is a JSON file at `<cache_dir>/.outline-cache.json`. A missing,
//! corrupt, or outdated file loads as an empty cache.

use crate::config::OutlineConfig;
use crate::types::MenuNode;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the cache file within the cache directory.
const CACHE_FILENAME: &str = ".outline-cache.json";

/// Version of the cache file format. Bump this to invalidate all existing
/// caches when the format or fingerprint computation changes.
const CACHE_VERSION: u32 = 1;

/// A single rendered block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub fingerprint: String,
    pub html: String,
    pub tags: Vec<String>,
}

/// Rendered blocks by cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationCache {
    pub version: u32,
    pub entries: HashMap<String, CacheEntry>,
}

impl NavigationCache {
    /// Create an empty cache (used for `--no-cache` or a first run).
    pub fn empty() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the cache directory. Returns an empty cache if the file
    /// doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(cache_dir: &Path) -> Self {
        let path = cache_path(cache_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let cache: Self = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "discarding unreadable cache");
                return Self::empty();
            }
        };
        if cache.version != CACHE_VERSION {
            return Self::empty();
        }
        cache
    }

    /// Save to the cache directory.
    pub fn save(&self, cache_dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(cache_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(cache_path(cache_dir), json)
    }

    /// Cached HTML for `key`, if rendered from the same inputs.
    pub fn get(&self, key: &str, fingerprint: &str) -> Option<&str> {
        self.entries
            .get(key)
            .filter(|entry| entry.fingerprint == fingerprint)
            .map(|entry| entry.html.as_str())
    }

    pub fn insert(&mut self, key: String, fingerprint: String, html: String, tags: Vec<String>) {
        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                html,
                tags,
            },
        );
    }

    /// Drop every entry tagged with `tag`. Returns how many were dropped.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        before - self.entries.len()
    }

    /// Return the cached HTML for `key`, rendering and storing it on a miss.
    pub fn get_or_render(
        &mut self,
        key: &str,
        fingerprint: &str,
        stats: &mut CacheStats,
        render: impl FnOnce() -> (String, Vec<String>),
    ) -> String {
        if let Some(html) = self.get(key, fingerprint) {
            stats.hit();
            return html.to_string();
        }
        stats.miss();
        let (html, tags) = render();
        self.insert(key.to_string(), fingerprint.to_string(), html.clone(), tags);
        html
    }
}

/// SHA-256 over everything a rendered block depends on.
pub fn fingerprint(tree: &[MenuNode], config: &OutlineConfig) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(b"outline\0");
    hasher.update(serde_json::to_vec(tree)?);
    hasher.update(b"\0");
    hasher.update(serde_json::to_vec(&config.strip)?);
    hasher.update(b"\0");
    hasher.update(serde_json::to_vec(&config.links)?);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Summary of cache performance for a run.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} rendered ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} rendered", self.misses)
        }
    }
}

/// Resolve the cache file path for a cache directory.
pub fn cache_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(CACHE_FILENAME)
}
