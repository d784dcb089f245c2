//! Shared test utilities for the realty-site test suite.
//!
//! Fixture content lives in `fixtures/content/`. Tests that write to the
//! content directory get an isolated copy via [`setup_fixtures`]; read-only
//! tests can use [`fixture_store`] and [`fixture_config`] directly.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = fixture_store();
//! let brenda = business_by_slug(&store, "brenda-devlin-real-estate");
//! assert_eq!(brenda.address.address_locality, "Palm Desert");
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{self, SiteConfig};
use crate::content::{BlogPostRecord, BusinessRecord, ContentStore};
use crate::metadata::SiteContext;

// =========================================================================
// Fixture setup
// =========================================================================

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

pub fn fixture_store() -> ContentStore {
    ContentStore::load(&fixtures_dir()).unwrap()
}

pub fn fixture_config() -> SiteConfig {
    config::load_config(&fixtures_dir()).unwrap()
}

/// Site context built from the fixture config and its primary business.
pub fn fixture_context<'a>(config: &'a SiteConfig, store: &'a ContentStore) -> SiteContext<'a> {
    SiteContext::new(config, store).unwrap()
}

/// A fixed build time so generated output is reproducible.
pub fn build_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 19, 12, 0, 0).unwrap()
}

// =========================================================================
// Record lookups. Panic with a clear message on miss.
// =========================================================================

pub fn business_by_slug<'a>(store: &'a ContentStore, slug: &str) -> &'a BusinessRecord {
    store
        .businesses
        .iter()
        .find(|b| b.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = store.businesses.iter().map(|b| b.slug.as_str()).collect();
            panic!("business '{slug}' not found. Available: {slugs:?}")
        })
}

pub fn post_by_slug<'a>(store: &'a ContentStore, slug: &str) -> &'a BlogPostRecord {
    store
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = store.posts.iter().map(|p| p.slug.as_str()).collect();
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}
