//! Static site generation.
//!
//! Loads the content store, renders every route and writes the site index.
//! Rendering is pure; this module is the only place that touches the output
//! directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                         # Home
//! ├── about/index.html
//! ├── faq/index.html
//! ├── blog/index.html                    # Blog index
//! ├── blog/{slug}/index.html             # One per post
//! ├── business/{slug}/index.html         # One per business
//! ├── 404.html                           # Not-found page
//! ├── sitemap.xml
//! ├── robots.txt
//! └── favicon.svg                        # Copied from content/assets/
//! ```
//!
//! Directory-style `index.html` files keep every canonical URL extensionless.

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::index::{CrawlerPolicy, Sitemap};
use crate::metadata::{self, SiteContext};
use crate::render;
use crate::resolve::{NotFound, Route, resolve};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory inside the content root copied verbatim to the output root.
pub const ASSETS_DIR: &str = "assets";
pub const NOT_FOUND_FILE: &str = "404.html";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const ROBOTS_FILE: &str = "robots.txt";

/// Files to skip when copying assets.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One rendered route.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub route: Route,
    pub title: String,
    /// Path relative to the output directory.
    pub file: PathBuf,
}

/// Everything a build wrote, relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// `404.html`, `sitemap.xml`, `robots.txt`.
    pub site_files: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
    pub sitemap_entries: usize,
}

impl GenerateReport {
    pub fn file_count(&self) -> usize {
        self.pages.len() + self.site_files.len() + self.assets.len()
    }
}

/// Build the site from `content_dir` into `output_dir`.
///
/// `now` stamps the sitemap entries that have no date of their own.
pub fn generate(
    content_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    now: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let store = ContentStore::load(content_dir)?;
    let ctx = SiteContext::new(config, &store)?;
    let mut report = GenerateReport::default();

    fs::create_dir_all(output_dir)?;

    for route in Route::enumerate(&store) {
        // Enumerated routes always resolve.
        let Ok(page) = resolve(&store, &route) else {
            continue;
        };
        let file = page_file(&route);
        write_file(output_dir, &file, &render::render_page(&ctx, &page).into_string())?;
        report.pages.push(GeneratedPage {
            title: metadata::for_page(&ctx, &page).title,
            route,
            file,
        });
    }

    let not_found = render::render_not_found(&ctx, &NotFound::Path(format!("/{NOT_FOUND_FILE}")));
    write_file(output_dir, Path::new(NOT_FOUND_FILE), &not_found.into_string())?;
    report.site_files.push(PathBuf::from(NOT_FOUND_FILE));

    let sitemap = Sitemap::build(config, &store, now);
    write_file(output_dir, Path::new(SITEMAP_FILE), &sitemap.to_xml())?;
    report.site_files.push(PathBuf::from(SITEMAP_FILE));
    report.sitemap_entries = sitemap.len();

    let robots = CrawlerPolicy::from_config(config).to_robots_txt();
    write_file(output_dir, Path::new(ROBOTS_FILE), &robots)?;
    report.site_files.push(PathBuf::from(ROBOTS_FILE));

    report.assets = copy_assets(&content_dir.join(ASSETS_DIR), output_dir)?;

    Ok(report)
}

/// Output file for a route: `index.html` under the route's directory.
pub fn page_file(route: &Route) -> PathBuf {
    let path = route.path();
    let dir = path.trim_matches('/');
    if dir.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(dir).join("index.html")
    }
}

fn write_file(output_dir: &Path, relative: &Path, contents: &str) -> std::io::Result<()> {
    let target = output_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, contents)
}

/// Copy every file under `src` into `dst`, keeping the directory layout.
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut copied = Vec::new();
    if !src.is_dir() {
        return Ok(copied);
    }

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied.push(relative.to_path_buf());
    }
    Ok(copied)
}
