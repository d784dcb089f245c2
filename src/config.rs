//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a sparse user file placed in the content directory.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (overrides stock defaults)
//! ├── businesses.json
//! ├── blog-posts.json
//! └── faq.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # Slug of the business profile used by the home, about and FAQ pages.
//! # Omit to use the first record in businesses.json.
//! primary_business = "brenda-devlin-real-estate"
//!
//! [site]
//! name = "Brenda Devlin Real Estate"
//! base_url = "https://brendadevlin.com"   # no trailing slash
//! locale = "en_US"                         # Open Graph locale
//! language = "en-US"                       # <html lang> and inLanguage
//! description = "..."
//!
//! [agent]
//! name = "Brenda Devlin"
//! job_title = "Real Estate Agent"
//! bio = "..."
//! knows_about = ["Real Estate", "Home Buying"]
//!
//! [seo]
//! keywords = ["real estate", "Coachella Valley"]
//! description_limit = 160
//!
//! [crawlers]
//! default = "allow"
//! sitemap_path = "/sitemap.xml"
//!
//! [[crawlers.rules]]
//! user_agent = "GPTBot"
//! access = "disallow"
//! path = "/"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Arrays (including
//! `crawlers.rules`) replace the stock value wholesale rather than merging.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Smallest description limit that still fits a word and an ellipsis.
pub const MIN_DESCRIPTION_LIMIT: usize = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business profile backing the home, about and FAQ pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_business: Option<String>,
    pub site: SiteInfo,
    pub agent: AgentConfig,
    pub seo: SeoConfig,
    pub crawlers: CrawlerConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with a slash".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.seo.description_limit < MIN_DESCRIPTION_LIMIT {
            return Err(ConfigError::Validation(format!(
                "seo.description_limit must be at least {MIN_DESCRIPTION_LIMIT}"
            )));
        }
        if !self.crawlers.sitemap_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "crawlers.sitemap_path must start with /".into(),
            ));
        }
        for rule in &self.crawlers.rules {
            let agent = rule.user_agent.trim();
            if agent.is_empty() || agent == "*" {
                return Err(ConfigError::Validation(format!(
                    "crawlers.rules user_agent {:?} is invalid (use crawlers.default for *)",
                    rule.user_agent
                )));
            }
            if !rule.path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "crawlers.rules path for {} must start with /",
                    rule.user_agent
                )));
            }
        }
        Ok(())
    }

    /// Absolute URL for a site-relative path (`"/"` maps to the bare base URL).
    pub fn absolute_url(&self, path: &str) -> String {
        if path == "/" || path.is_empty() {
            self.site.base_url.clone()
        } else {
            format!("{}{}", self.site.base_url, path)
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Origin without trailing slash, e.g. `https://brendadevlin.com`.
    pub base_url: String,
    /// Open Graph locale (`en_US`).
    pub locale: String,
    /// BCP 47 language tag (`en-US`).
    pub language: String,
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Brenda Devlin Real Estate".to_string(),
            base_url: "https://brendadevlin.com".to_string(),
            locale: "en_US".to_string(),
            language: "en-US".to_string(),
            description: "Real estate insights, market reports, and home buying advice for the Coachella Valley".to_string(),
        }
    }
}

/// The agent behind the site (about page, blog author fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    pub job_title: String,
    pub bio: String,
    pub knows_about: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Brenda Devlin".to_string(),
            job_title: "Real Estate Agent".to_string(),
            bio: "Southern California native with 23 years of real estate experience, specializing in Palm Desert, La Quinta, Indian Wells, and Palm Springs.".to_string(),
            knows_about: [
                "Real Estate",
                "Home Buying",
                "Home Selling",
                "Golf Course Communities",
                "55+ Communities",
                "Coachella Valley Market",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Search metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    /// Site-wide keywords, merged into every page's keyword set.
    pub keywords: Vec<String>,
    /// Maximum length (in characters) of a meta description.
    pub description_limit: usize,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["real estate".to_string(), "Coachella Valley".to_string()],
            description_limit: 160,
        }
    }
}

/// Whether a crawler may fetch a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Allow,
    Disallow,
}

impl Access {
    /// The `robots.txt` directive name.
    pub fn directive(self) -> &'static str {
        match self {
            Access::Allow => "Allow",
            Access::Disallow => "Disallow",
        }
    }
}

/// One entry of the crawler table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerRule {
    pub user_agent: String,
    pub access: Access,
    #[serde(default = "default_rule_path")]
    pub path: String,
}

fn default_rule_path() -> String {
    "/".to_string()
}

impl CrawlerRule {
    fn new(user_agent: &str, access: Access) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            access,
            path: default_rule_path(),
        }
    }
}

/// Crawler access table rendered into `robots.txt`.
///
/// Rules are matched in order; the first rule whose `user_agent` equals the
/// crawler's identifier wins. Unlisted agents fall through to `default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlerConfig {
    pub default: Access,
    pub sitemap_path: String,
    pub rules: Vec<CrawlerRule>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        use Access::{Allow, Disallow};
        // Search and citation crawlers are allowed, training crawlers are not.
        let table = [
            ("Googlebot", Allow),
            ("Google-Extended", Disallow),
            ("OAI-SearchBot", Allow),
            ("ChatGPT-User", Allow),
            ("GPTBot", Disallow),
            ("ClaudeBot", Disallow),
            ("anthropic-ai", Disallow),
            ("Claude-Web", Disallow),
            ("PerplexityBot", Allow),
            ("Bytespider", Disallow),
            ("Meta-ExternalAgent", Disallow),
            ("Amazonbot", Allow),
            ("Bingbot", Allow),
            ("DuckDuckBot", Allow),
            ("Slurp", Allow),
            ("Baiduspider", Allow),
            ("Yandex", Allow),
        ];
        Self {
            default: Allow,
            sitemap_path: "/sitemap.xml".to_string(),
            rules: table
                .iter()
                .map(|(agent, access)| CrawlerRule::new(agent, *access))
                .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from the content directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# realty-site configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Place this file in the content directory next to businesses.json.
# Unknown keys will cause an error.

# Slug of the business profile used by the home, about and FAQ pages.
# When omitted, the first record in businesses.json is used.
# primary_business = "brenda-devlin-real-estate"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "Brenda Devlin Real Estate"
# Origin used for canonical URLs, the sitemap and JSON-LD. No trailing slash.
base_url = "https://brendadevlin.com"
# Open Graph locale.
locale = "en_US"
# <html lang> and schema.org inLanguage.
language = "en-US"
description = "Real estate insights, market reports, and home buying advice for the Coachella Valley"

# ---------------------------------------------------------------------------
# The agent (about page, Person schema)
# ---------------------------------------------------------------------------
[agent]
name = "Brenda Devlin"
job_title = "Real Estate Agent"
bio = "Southern California native with 23 years of real estate experience, specializing in Palm Desert, La Quinta, Indian Wells, and Palm Springs."
knows_about = [
    "Real Estate",
    "Home Buying",
    "Home Selling",
    "Golf Course Communities",
    "55+ Communities",
    "Coachella Valley Market",
]

# ---------------------------------------------------------------------------
# Search metadata
# ---------------------------------------------------------------------------
[seo]
# Merged into every page's keyword list.
keywords = ["real estate", "Coachella Valley"]
# Meta descriptions longer than this many characters are truncated (minimum 4).
description_limit = 160

# ---------------------------------------------------------------------------
# Crawler policy (robots.txt)
# ---------------------------------------------------------------------------
# Rules match the crawler's user agent exactly, first match wins.
# Agents not listed get the default. Setting `rules` replaces the whole list.
[crawlers]
default = "allow"
sitemap_path = "/sitemap.xml"

[[crawlers.rules]]
user_agent = "Googlebot"
access = "allow"

[[crawlers.rules]]
user_agent = "Google-Extended"
access = "disallow"

[[crawlers.rules]]
user_agent = "OAI-SearchBot"
access = "allow"

[[crawlers.rules]]
user_agent = "ChatGPT-User"
access = "allow"

[[crawlers.rules]]
user_agent = "GPTBot"
access = "disallow"

[[crawlers.rules]]
user_agent = "ClaudeBot"
access = "disallow"

[[crawlers.rules]]
user_agent = "anthropic-ai"
access = "disallow"

[[crawlers.rules]]
user_agent = "Claude-Web"
access = "disallow"

[[crawlers.rules]]
user_agent = "PerplexityBot"
access = "allow"

[[crawlers.rules]]
user_agent = "Bytespider"
access = "disallow"

[[crawlers.rules]]
user_agent = "Meta-ExternalAgent"
access = "disallow"

[[crawlers.rules]]
user_agent = "Amazonbot"
access = "allow"

[[crawlers.rules]]
user_agent = "Bingbot"
access = "allow"

[[crawlers.rules]]
user_agent = "DuckDuckBot"
access = "allow"

[[crawlers.rules]]
user_agent = "Slurp"
access = "allow"

[[crawlers.rules]]
user_agent = "Baiduspider"
access = "allow"

[[crawlers.rules]]
user_agent = "Yandex"
access = "allow"
"##
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.site.name, defaults.site.name);
        assert_eq!(parsed.site.base_url, defaults.site.base_url);
        assert_eq!(parsed.agent.knows_about, defaults.agent.knows_about);
        assert_eq!(parsed.seo.description_limit, defaults.seo.description_limit);
        assert_eq!(parsed.crawlers.rules, defaults.crawlers.rules);
        assert_eq!(parsed.crawlers.default, Access::Allow);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.base_url, "https://brendadevlin.com");
        assert!(config.primary_business.is_none());
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\nname = \"Desert Homes\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Desert Homes");
        assert_eq!(config.site.locale, "en_US");
        assert_eq!(config.crawlers.rules.len(), 17);
    }

    #[test]
    fn rules_override_replaces_table() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[[crawlers.rules]]
user_agent = "GPTBot"
access = "allow"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.crawlers.rules.len(), 1);
        assert_eq!(config.crawlers.rules[0].access, Access::Allow);
        assert_eq!(config.crawlers.rules[0].path, "/");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\ntitle = \"x\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn trailing_slash_base_url_rejected() {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://example.com/".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn wildcard_rule_rejected() {
        let mut config = SiteConfig::default();
        config.crawlers.rules.push(CrawlerRule::new("*", Access::Disallow));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_description_limit_rejected() {
        let mut config = SiteConfig::default();
        config.seo.description_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn description_limit_must_fit_an_ellipsis() {
        let mut config = SiteConfig::default();
        config.seo.description_limit = MIN_DESCRIPTION_LIMIT - 1;
        assert!(config.validate().is_err());
        config.seo.description_limit = MIN_DESCRIPTION_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn merge_toml_overlays_nested_tables() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn absolute_url_joins_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.absolute_url("/"), "https://brendadevlin.com");
        assert_eq!(
            config.absolute_url("/blog/x"),
            "https://brendadevlin.com/blog/x"
        );
    }
}
