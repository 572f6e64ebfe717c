//! Outline configuration module.
//!
//! Handles loading, validating, and merging `outline.toml`. Stock defaults
//! reproduce the stock outline block; a user file overrides only the keys it
//! names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [menu]
//! name_prefix = "ogmenu-"   # Menu id = prefix + menu instance id
//!
//! [links]
//! up_label = "Up"
//! previous_icon = "icon icon--previous"
//! next_icon = "icon icon--next"
//!
//! [strip]
//! "entity.rdf_entity.canonical" = "Overview"
//! "entity.rdf_entity.member_overview" = "Members"
//! "entity.rdf_entity.about_page" = "About"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables are merged key by key, so a user `[strip]` table adds rules on top
//! of the stock ones (or retitles one by reusing its route name):
//!
//! ```toml
//! [strip]
//! "entity.rdf_entity.canonical" = "Home"
//! "view.glossary.page" = "Glossary"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::navigation::StripRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "outline.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Outline configuration loaded from `outline.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    /// How group containers map to menu ids.
    pub menu: MenuConfig,
    /// Labels and icon markers of the rendered links.
    pub links: LinksConfig,
    /// Placeholder links hidden from previous/next.
    pub strip: StripRules,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
            links: LinksConfig::default(),
            strip: default_strip_rules(),
        }
    }
}

impl OutlineConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.menu.name_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "menu.name_prefix must not be empty".into(),
            ));
        }
        if self.links.up_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "links.up_label must not be empty".into(),
            ));
        }
        if let Some((route, _)) = self.strip.iter().find(|(_, title)| title.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "strip.\"{route}\" must name a title"
            )));
        }
        Ok(())
    }

    /// Menu id for a menu instance, e.g. `ogmenu-12`.
    pub fn menu_id(&self, menu_instance: &str) -> String {
        format!("{}{}", self.menu.name_prefix, menu_instance)
    }
}

/// Menu naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    pub name_prefix: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            name_prefix: "ogmenu-".to_string(),
        }
    }
}

/// Link decoration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Text of the link to the parent entry.
    pub up_label: String,
    /// CSS classes of the icon prepended to the previous link's title.
    pub previous_icon: String,
    /// CSS classes of the icon appended to the next link's title.
    pub next_icon: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            up_label: "Up".to_string(),
            previous_icon: "icon icon--previous".to_string(),
            next_icon: "icon icon--next".to_string(),
        }
    }
}

/// Placeholder links generated for every group menu.
pub fn default_strip_rules() -> StripRules {
    StripRules::new()
        .with("entity.rdf_entity.canonical", "Overview")
        .with("entity.rdf_entity.member_overview", "Members")
        .with("entity.rdf_entity.about_page", "About")
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(OutlineConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `outline.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<OutlineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: OutlineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `outline.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<OutlineConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `outline.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Outline Navigation Configuration
# ================================
# All settings are optional. Values shown below are the defaults.
# Tables are merged with the defaults key by key.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Menu naming
# ---------------------------------------------------------------------------
[menu]
# A group's outline menu is named <name_prefix><menu instance id>.
name_prefix = "ogmenu-"

# ---------------------------------------------------------------------------
# Rendered links
# ---------------------------------------------------------------------------
[links]
# Text of the link to the parent entry.
up_label = "Up"

# CSS classes of the icon placed before the previous link's title.
previous_icon = "icon icon--previous"

# CSS classes of the icon placed after the next link's title.
next_icon = "icon icon--next"

# ---------------------------------------------------------------------------
# Placeholder links
# ---------------------------------------------------------------------------
# Route name = exact title. Links matching both are skipped by
# previous/next, but still count as parents for "Up".
[strip]
"entity.rdf_entity.canonical" = "Overview"
"entity.rdf_entity.member_overview" = "Members"
"entity.rdf_entity.about_page" = "About"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MenuNode;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_stock_links() {
        let config = OutlineConfig::default();
        assert_eq!(config.links.up_label, "Up");
        assert_eq!(config.links.previous_icon, "icon icon--previous");
        assert_eq!(config.links.next_icon, "icon icon--next");
        assert_eq!(config.menu.name_prefix, "ogmenu-");
    }

    #[test]
    fn default_config_strips_group_placeholders() {
        let config = OutlineConfig::default();
        let routes: Vec<&str> = config.strip.iter().map(|(r, _)| r).collect();
        assert_eq!(
            routes,
            vec![
                "entity.rdf_entity.about_page",
                "entity.rdf_entity.canonical",
                "entity.rdf_entity.member_overview",
            ]
        );
        let members =
            MenuNode::new("m", "Members", "/m").with_route("entity.rdf_entity.member_overview");
        assert!(config.strip.matches(&members));
    }

    #[test]
    fn menu_id_uses_prefix() {
        let config = OutlineConfig::default();
        assert_eq!(config.menu_id("12"), "ogmenu-12");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[links]
up_label = "Back to contents"
"##;
        let config: OutlineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.links.up_label, "Back to contents");
        // Default values preserved
        assert_eq!(config.links.next_icon, "icon icon--next");
        assert_eq!(config.menu.name_prefix, "ogmenu-");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r##"
[links]
up_lable = "typo"
"##;
        assert!(toml::from_str::<OutlineConfig>(toml).is_err());
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let config: OutlineConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = OutlineConfig::default();
        assert_eq!(config.strip, defaults.strip);
        assert_eq!(config.links.up_label, defaults.links.up_label);
        assert_eq!(config.menu.name_prefix, defaults.menu.name_prefix);
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_overlay_replaces_scalars() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_extends_strip_table() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[strip]
"view.glossary.page" = "Glossary"
"entity.rdf_entity.canonical" = "Home"
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();

        let glossary = MenuNode::new("g", "Glossary", "/g").with_route("view.glossary.page");
        let home = MenuNode::new("h", "Home", "/h").with_route("entity.rdf_entity.canonical");
        let overview =
            MenuNode::new("o", "Overview", "/o").with_route("entity.rdf_entity.canonical");
        assert!(config.strip.matches(&glossary));
        assert!(config.strip.matches(&home));
        assert!(!config.strip.matches(&overview));
        // Untouched stock rule survives
        let about = MenuNode::new("a", "About", "/a").with_route("entity.rdf_entity.about_page");
        assert!(config.strip.matches(&about));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_prefix_is_invalid() {
        let mut config = OutlineConfig::default();
        config.menu.name_prefix = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn blank_up_label_is_invalid() {
        let mut config = OutlineConfig::default();
        config.links.up_label = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_strip_title_is_invalid() {
        let mut config = OutlineConfig::default();
        config.strip = config.strip.with("some.route", "");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("some.route"));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.links.up_label, "Up");
        assert_eq!(config.strip, default_strip_rules());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r##"
[menu]
name_prefix = "toc-"

[links]
next_icon = "arrow arrow--right"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.menu_id("7"), "toc-7");
        assert_eq!(config.links.next_icon, "arrow arrow--right");
        assert_eq!(config.links.previous_icon, "icon icon--previous");
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[links\nup_label = 1").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_merged_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[links]\nup_label = \"\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
