//! Content store: the JSON records every page is built from.
//!
//! The content directory holds one file per collection:
//!
//! ```text
//! content/
//! ├── businesses.json      # [BusinessRecord]  → /business/{slug}
//! ├── blog-posts.json      # [BlogPostRecord]  → /blog/{slug}
//! ├── faq.json             # [FaqEntry]        → /faq (optional)
//! └── about.md             # about page body   → /about (optional)
//! ```
//!
//! Records are loaded once and never mutated. Slugs are the routing key and
//! become a single URL segment and output directory, so each must be
//! non-empty ASCII alphanumerics, `-` or `_`, and unique within its
//! collection. Everything else in the files is trusted to be well formed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BUSINESSES_FILE: &str = "businesses.json";
pub const BLOG_POSTS_FILE: &str = "blog-posts.json";
pub const FAQ_FILE: &str = "faq.json";
pub const ABOUT_FILE: &str = "about.md";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Duplicate slug {slug:?} in {collection}")]
    DuplicateSlug {
        collection: Collection,
        slug: String,
    },
    #[error("Invalid slug {slug:?} in {collection}: use letters, digits, - or _")]
    InvalidSlug {
        collection: Collection,
        slug: String,
    },
    #[error("No business records found in {0}")]
    NoBusinesses(PathBuf),
    #[error("primary_business {0:?} does not match any business slug")]
    UnknownPrimaryBusiness(String),
}

/// A routable, slug-keyed record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Business,
    Blog,
}

impl Collection {
    /// URL path segment the collection lives under.
    pub fn segment(self) -> &'static str {
        match self {
            Collection::Business => "business",
            Collection::Blog => "blog",
        }
    }

    /// Canonical path of a record in this collection.
    pub fn record_path(self, slug: &str) -> String {
        format!("/{}/{}", self.segment(), slug)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Collection::Business => BUSINESSES_FILE,
            Collection::Blog => BLOG_POSTS_FILE,
        })
    }
}

// ============================================================================
// Business records
// ============================================================================

/// schema.org type tag of a business profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    RealEstateAgent,
    LocalBusiness,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub address_country: String,
}

fn default_country() -> String {
    "US".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

/// A business profile from `businesses.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub slug: String,
    #[serde(rename = "type")]
    pub business_type: BusinessType,
    pub name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default)]
    pub brand_voice: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: Address,
    #[serde(default)]
    pub geo: Option<Geo>,
    pub area_served: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    /// Machine-readable hours (`Mo-Su 00:00-23:59`).
    #[serde(default)]
    pub opening_hours: Option<String>,
    /// Human-readable hours shown in the NAP block.
    #[serde(default)]
    pub opening_hours_display: Option<String>,
    #[serde(default)]
    pub same_as: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl BusinessRecord {
    /// Website as an absolute `https://` URL.
    ///
    /// The data sometimes stores bare hostnames (`brendadevlin.com`).
    pub fn website_url(&self) -> Option<String> {
        self.website.as_deref().map(|w| {
            let bare = w
                .trim_start_matches("https://")
                .trim_start_matches("http://");
            format!("https://{bare}")
        })
    }

    /// Phone number reduced to digits for `tel:` links.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

// ============================================================================
// Blog posts
// ============================================================================

/// One block of a post body.
///
/// Unrecognized `type` values deserialize to [`ContentBlock::Unknown`] and
/// render as nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph {
        text: String,
    },
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        text: String,
    },
    List {
        #[serde(default)]
        items: Vec<String>,
    },
    #[serde(other)]
    Unknown,
}

fn default_heading_level() -> u8 {
    2
}

/// A blog post from `blog-posts.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostRecord {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub publish_date: NaiveDate,
    pub modified_date: NaiveDate,
    #[serde(default)]
    pub read_time: Option<String>,
    pub description: String,
    pub excerpt: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

// ============================================================================
// FAQ
// ============================================================================

/// A static question/answer pair from `faq.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

// ============================================================================
// Store
// ============================================================================

/// All content records, loaded once at build time.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pub businesses: Vec<BusinessRecord>,
    pub posts: Vec<BlogPostRecord>,
    pub faq: Vec<FaqEntry>,
    /// Raw markdown of `about.md`, if present.
    pub about: Option<String>,
}

impl ContentStore {
    /// Load every collection from the content directory.
    ///
    /// `businesses.json` is required; the other files are optional.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let businesses_path = dir.join(BUSINESSES_FILE);
        let businesses: Vec<BusinessRecord> = read_json(&businesses_path)?;
        if businesses.is_empty() {
            return Err(ContentError::NoBusinesses(businesses_path));
        }

        let posts_path = dir.join(BLOG_POSTS_FILE);
        let posts: Vec<BlogPostRecord> = if posts_path.exists() {
            read_json(&posts_path)?
        } else {
            Vec::new()
        };

        let faq_path = dir.join(FAQ_FILE);
        let faq: Vec<FaqEntry> = if faq_path.exists() {
            read_json(&faq_path)?
        } else {
            Vec::new()
        };

        let about_path = dir.join(ABOUT_FILE);
        let about = if about_path.exists() {
            Some(read_text(&about_path)?)
        } else {
            None
        };

        let store = Self {
            businesses,
            posts,
            faq,
            about,
        };
        store.check_slugs()?;
        Ok(store)
    }

    fn check_slugs(&self) -> Result<(), ContentError> {
        check_collection(
            Collection::Business,
            self.businesses.iter().map(|b| b.slug.as_str()),
        )?;
        check_collection(Collection::Blog, self.posts.iter().map(|p| p.slug.as_str()))
    }

    /// Pick the business that backs the site-wide pages.
    ///
    /// With no explicit slug the first record is used.
    pub fn primary_business(&self, slug: Option<&str>) -> Result<&BusinessRecord, ContentError> {
        match slug {
            Some(slug) => self
                .businesses
                .iter()
                .find(|b| b.slug == slug)
                .ok_or_else(|| ContentError::UnknownPrimaryBusiness(slug.to_string())),
            None => self
                .businesses
                .first()
                .ok_or_else(|| ContentError::NoBusinesses(PathBuf::from(BUSINESSES_FILE))),
        }
    }
}

/// A slug is one URL path segment: ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn check_collection<'a>(
    collection: Collection,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug {
                collection,
                slug: slug.to_string(),
            });
        }
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                collection,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn loads_fixture_collections() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        assert_eq!(store.businesses.len(), 2);
        assert_eq!(store.posts.len(), 3);
        assert_eq!(store.faq.len(), 4);
        assert!(store.about.is_some());
    }

    #[test]
    fn business_fields_deserialize_from_camel_case() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        let b = business_by_slug(&store, "brenda-devlin-real-estate");
        assert_eq!(b.business_type, BusinessType::RealEstateAgent);
        assert_eq!(b.address.address_locality, "Palm Desert");
        assert!(b.geo.is_some());
        assert_eq!(b.same_as.len(), 3);
        assert!(!b.services.is_empty());
    }

    #[test]
    fn optional_business_fields_default() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        let b = business_by_slug(&store, "desert-luxury-homes");
        assert!(b.geo.is_none());
        assert!(b.email.is_none());
        assert!(b.testimonials.is_empty());
    }

    #[test]
    fn unknown_block_type_is_kept_as_unknown() {
        let json = r#"[{"type":"paragraph","text":"a"},{"type":"quote","text":"b"},{"type":"list","items":["x"]}]"#;
        let blocks: Vec<ContentBlock> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks[1], ContentBlock::Unknown);
        assert_eq!(
            blocks[2],
            ContentBlock::List {
                items: vec!["x".to_string()]
            }
        );
    }

    #[test]
    fn missing_optional_files_are_empty() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join(BLOG_POSTS_FILE)).unwrap();
        fs::remove_file(tmp.path().join(FAQ_FILE)).unwrap();
        fs::remove_file(tmp.path().join(ABOUT_FILE)).unwrap();
        let store = ContentStore::load(tmp.path()).unwrap();
        assert!(store.posts.is_empty());
        assert!(store.faq.is_empty());
        assert!(store.about.is_none());
    }

    #[test]
    fn missing_businesses_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            ContentStore::load(tmp.path()),
            Err(ContentError::Io { .. })
        ));
    }

    #[test]
    fn empty_businesses_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(BUSINESSES_FILE), "[]").unwrap();
        assert!(matches!(
            ContentStore::load(tmp.path()),
            Err(ContentError::NoBusinesses(_))
        ));
    }

    #[test]
    fn duplicate_post_slug_rejected() {
        let tmp = setup_fixtures();
        let path = tmp.path().join(BLOG_POSTS_FILE);
        let mut posts: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let dup = posts[0].clone();
        posts.push(dup);
        fs::write(&path, serde_json::to_string(&posts).unwrap()).unwrap();

        match ContentStore::load(tmp.path()) {
            Err(ContentError::DuplicateSlug { collection, slug }) => {
                assert_eq!(collection, Collection::Blog);
                assert_eq!(slug, posts[0]["slug"].as_str().unwrap());
            }
            other => panic!("expected duplicate slug error, got {other:?}"),
        }
    }

    #[test]
    fn slug_shapes() {
        assert!(is_valid_slug("brenda-devlin-real-estate"));
        assert!(is_valid_slug("report_2025"));
        for bad in ["", "..", ".", "../x", "a/b", "a\\b", "has space", "café", "x.html"] {
            assert!(!is_valid_slug(bad), "{bad:?} accepted");
        }
    }

    fn set_first_slug(path: &Path, slug: &str) {
        let mut records: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        records[0]["slug"] = serde_json::Value::from(slug);
        fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
    }

    #[test]
    fn traversal_post_slug_rejected() {
        let tmp = setup_fixtures();
        set_first_slug(&tmp.path().join(BLOG_POSTS_FILE), "../x");

        match ContentStore::load(tmp.path()) {
            Err(ContentError::InvalidSlug { collection, slug }) => {
                assert_eq!(collection, Collection::Blog);
                assert_eq!(slug, "../x");
            }
            other => panic!("expected invalid slug error, got {other:?}"),
        }
    }

    #[test]
    fn nested_business_slug_rejected() {
        let tmp = setup_fixtures();
        set_first_slug(&tmp.path().join(BUSINESSES_FILE), "a/b");
        assert!(matches!(
            ContentStore::load(tmp.path()),
            Err(ContentError::InvalidSlug {
                collection: Collection::Business,
                ..
            })
        ));
    }

    #[test]
    fn primary_business_defaults_to_first() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        assert_eq!(
            store.primary_business(None).unwrap().slug,
            "brenda-devlin-real-estate"
        );
        assert_eq!(
            store.primary_business(Some("desert-luxury-homes")).unwrap().slug,
            "desert-luxury-homes"
        );
        assert!(matches!(
            store.primary_business(Some("nope")),
            Err(ContentError::UnknownPrimaryBusiness(_))
        ));
    }

    #[test]
    fn website_url_normalizes_scheme() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path()).unwrap();
        let b = business_by_slug(&store, "brenda-devlin-real-estate");
        assert_eq!(b.website_url().as_deref(), Some("https://brendadevlin.com"));
        assert_eq!(b.phone_digits(), "7605551234");
    }
}
