//! Site index: `sitemap.xml` and `robots.txt`.
//!
//! # Sitemap
//!
//! One entry per resolvable route, in [`Route::enumerate`] order:
//!
//! | Route | Priority | Change frequency | Last modified |
//! |-------|----------|------------------|---------------|
//! | `/` | 1.0 | weekly | build time |
//! | `/about`, `/faq` | 0.8 | monthly | build time |
//! | `/blog` | 0.9 | weekly | build time |
//! | `/business/{slug}` | 0.9 | weekly | build time |
//! | `/blog/{slug}` | 0.7 | monthly | post `modifiedDate`, midnight UTC |
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://brendadevlin.com</loc>
//!     <lastmod>2025-10-19T12:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! # Crawler policy
//!
//! [`CrawlerPolicy`] is the `[crawlers]` table from the config plus the
//! site's sitemap URL and host.

use crate::config::{Access, CrawlerRule, SiteConfig};
use crate::content::ContentStore;
use crate::resolve::{Route, find_post};
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Sitemap
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    /// Relative importance, `0.0..=1.0`.
    pub priority: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

impl Sitemap {
    /// Enumerate every page of the site. `now` is the build time.
    pub fn build(config: &SiteConfig, store: &ContentStore, now: DateTime<Utc>) -> Self {
        let entries = Route::enumerate(store)
            .into_iter()
            .map(|route| {
                let (priority, change_frequency) = match &route {
                    Route::Home => (1.0, ChangeFrequency::Weekly),
                    Route::About | Route::Faq => (0.8, ChangeFrequency::Monthly),
                    Route::BlogIndex | Route::Business(_) => (0.9, ChangeFrequency::Weekly),
                    Route::BlogPost(_) | Route::Unknown(_) => (0.7, ChangeFrequency::Monthly),
                };
                let last_modified = match &route {
                    Route::BlogPost(slug) => find_post(store, slug)
                        .map(|post| post.modified_date.and_time(NaiveTime::MIN).and_utc())
                        .unwrap_or(now),
                    _ => now,
                };
                SitemapEntry {
                    url: config.absolute_url(&route.path()),
                    last_modified,
                    change_frequency,
                    priority,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 * (self.entries.len() + 1));

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.change_frequency.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Crawler policy
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CrawlerPolicy {
    pub rules: Vec<CrawlerRule>,
    /// Applies to every agent without a rule of its own.
    pub default: Access,
    pub sitemap_url: String,
    pub host: String,
}

impl CrawlerPolicy {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            rules: config.crawlers.rules.clone(),
            default: config.crawlers.default,
            sitemap_url: config.absolute_url(&config.crawlers.sitemap_path),
            host: config.site.base_url.clone(),
        }
    }

    /// Access for a crawler. Agent names match exactly; the first rule wins.
    pub fn evaluate(&self, user_agent: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.user_agent == user_agent)
            .map_or(self.default, |rule| rule.access)
    }

    pub fn to_robots_txt(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&format!(
                "User-agent: {}\n{}: {}\n\n",
                rule.user_agent,
                rule.access.directive(),
                rule.path
            ));
        }
        out.push_str(&format!("User-agent: *\n{}: /\n\n", self.default.directive()));
        out.push_str(&format!("Sitemap: {}\n", self.sitemap_url));
        out.push_str(&format!("Host: {}\n", self.host));
        out
    }
}
