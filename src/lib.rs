//! # Realty Site
//!
//! A static site generator for a real-estate agent's marketing site. Business
//! profiles and blog posts are JSON records; every page gets SEO metadata,
//! schema.org structured data, and a place in the sitemap.
//!
//! # Architecture: Content to Pages
//!
//! ```text
//! content/  →  ContentStore  →  Route  →  Page  →  PageMetadata + JsonLd  →  HTML
//!                                                   Sitemap + CrawlerPolicy  →  sitemap.xml, robots.txt
//! ```
//!
//! Everything after loading is a pure function of the store, the config and
//! the build timestamp. The same inputs always produce byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Loads `businesses.json`, `blog-posts.json`, `faq.json` and `about.md` |
//! | [`resolve`] | Parses site paths into routes and binds them to records |
//! | [`metadata`] | Title, description, keywords, canonical URL and Open Graph per page |
//! | [`schema`] | JSON-LD objects per page: business, person, service, posts, FAQ, breadcrumbs |
//! | [`render`] | Maud templates for every page type, including the not-found page |
//! | [`index`] | `sitemap.xml` entries and the `robots.txt` crawler policy |
//! | [`generate`] | Writes the whole site to the output directory |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting for `check`, `build` and `robots` |
//!
//! # Design Decisions
//!
//! ## Explicit Primary Business
//!
//! Home, about and FAQ describe one business. Which one is a config value
//! (`primary_business`, defaulting to the first record) carried in a
//! [`metadata::SiteContext`] rather than an implicit "first record" lookup in
//! each page.
//!
//! ## One Object per Facet
//!
//! Structured data is emitted as several self-contained JSON-LD objects per
//! page (business, person, service, breadcrumbs) instead of one `@graph`.
//! Each is typed in [`schema`] and round-trips through serde unchanged.
//!
//! ## Crawler Table as Config
//!
//! Which crawlers may fetch the site is a `[[crawlers.rules]]` table. The
//! stock table allows search and citation crawlers and blocks training
//! crawlers; sites override it without code changes.

pub mod config;
pub mod content;
pub mod generate;
pub mod index;
pub mod metadata;
pub mod output;
pub mod render;
pub mod resolve;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;
