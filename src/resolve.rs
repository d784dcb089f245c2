//! Path routing and record lookup.
//!
//! The site has a fixed route table:
//!
//! | Path | Route |
//! |------|-------|
//! | `/` | [`Route::Home`] |
//! | `/about` | [`Route::About`] |
//! | `/faq` | [`Route::Faq`] |
//! | `/blog` | [`Route::BlogIndex`] |
//! | `/blog/{slug}` | [`Route::BlogPost`] |
//! | `/business/{slug}` | [`Route::Business`] |
//!
//! Slugs are opaque: a record matches only when its `slug` is byte-for-byte
//! equal to the path segment.

use crate::content::{BlogPostRecord, BusinessRecord, Collection, ContentStore};

/// A parsed request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Faq,
    BlogIndex,
    BlogPost(String),
    Business(String),
    /// Any path outside the route table.
    Unknown(String),
}

impl Route {
    /// Parse a site path. A trailing `/` or `/index.html` is ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path
            .strip_suffix("index.html")
            .unwrap_or(path)
            .trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["faq"] => Route::Faq,
            ["blog"] => Route::BlogIndex,
            ["blog", slug] => Route::BlogPost(slug.to_string()),
            ["business", slug] => Route::Business(slug.to_string()),
            _ => Route::Unknown(path.to_string()),
        }
    }

    /// Canonical site path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Faq => "/faq".to_string(),
            Route::BlogIndex => "/blog".to_string(),
            Route::BlogPost(slug) => Collection::Blog.record_path(slug),
            Route::Business(slug) => Collection::Business.record_path(slug),
            Route::Unknown(path) => path.clone(),
        }
    }

    /// Every route the store can resolve: static pages first, then one per
    /// business, then one per blog post.
    pub fn enumerate(store: &ContentStore) -> Vec<Route> {
        let mut routes = vec![Route::Home, Route::About, Route::Faq, Route::BlogIndex];
        routes.extend(
            store
                .businesses
                .iter()
                .map(|b| Route::Business(b.slug.clone())),
        );
        routes.extend(store.posts.iter().map(|p| Route::BlogPost(p.slug.clone())));
        routes
    }
}

/// A route bound to the content it displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page<'a> {
    Home,
    About,
    Faq,
    BlogIndex,
    BlogPost(&'a BlogPostRecord),
    Business(&'a BusinessRecord),
}

/// Why a route did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// The slug matched no record in the collection.
    Record { collection: Collection, slug: String },
    /// The path is not in the route table.
    Path(String),
}

impl NotFound {
    pub fn collection(&self) -> Option<Collection> {
        match self {
            NotFound::Record { collection, .. } => Some(*collection),
            NotFound::Path(_) => None,
        }
    }
}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFound::Record { collection, slug } => {
                write!(f, "no record {slug:?} in {collection}")
            }
            NotFound::Path(path) => write!(f, "no page at {path}"),
        }
    }
}

pub fn find_business<'a>(store: &'a ContentStore, slug: &str) -> Option<&'a BusinessRecord> {
    store.businesses.iter().find(|b| b.slug == slug)
}

pub fn find_post<'a>(store: &'a ContentStore, slug: &str) -> Option<&'a BlogPostRecord> {
    store.posts.iter().find(|p| p.slug == slug)
}

/// Bind a route to its record, or report why it does not exist.
pub fn resolve<'a>(store: &'a ContentStore, route: &Route) -> Result<Page<'a>, NotFound> {
    match route {
        Route::Home => Ok(Page::Home),
        Route::About => Ok(Page::About),
        Route::Faq => Ok(Page::Faq),
        Route::BlogIndex => Ok(Page::BlogIndex),
        Route::BlogPost(slug) => find_post(store, slug)
            .map(Page::BlogPost)
            .ok_or_else(|| NotFound::Record {
                collection: Collection::Blog,
                slug: slug.clone(),
            }),
        Route::Business(slug) => find_business(store, slug)
            .map(Page::Business)
            .ok_or_else(|| NotFound::Record {
                collection: Collection::Business,
                slug: slug.clone(),
            }),
        Route::Unknown(path) => Err(NotFound::Path(path.clone())),
    }
}
