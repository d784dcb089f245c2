//! Per-page SEO metadata.
//!
//! Every page gets a [`PageMetadata`] bundle: the `<title>`, meta description,
//! keyword list, canonical path and Open Graph block. Bundles are pure
//! functions of the record being displayed and the [`SiteContext`]; building
//! the same page twice yields identical metadata.
//!
//! ## Keywords
//!
//! A page's keywords are the site-wide `seo.keywords` followed by terms taken
//! from the record (business name, locality, post category). Duplicates are
//! dropped case-insensitively, keeping the first spelling.
//!
//! ## Not found
//!
//! A route whose slug matches nothing gets a minimal bundle with a fixed title
//! ([`BUSINESS_NOT_FOUND`], [`POST_NOT_FOUND`], [`PAGE_NOT_FOUND`]) and no
//! canonical URL, keywords or Open Graph block.

use crate::config::SiteConfig;
use crate::content::{BlogPostRecord, BusinessRecord, Collection, ContentError, ContentStore};
use crate::resolve::Page;
use chrono::NaiveDate;
use std::collections::HashSet;

pub const BUSINESS_NOT_FOUND: &str = "Business Not Found";
pub const POST_NOT_FOUND: &str = "Blog Post Not Found";
pub const PAGE_NOT_FOUND: &str = "Page Not Found";

/// Everything a synthesizer needs besides the record itself.
///
/// The primary business backs the site-wide pages (home, about, FAQ). It is
/// chosen once from `primary_business` in the config.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    pub store: &'a ContentStore,
    pub business: &'a BusinessRecord,
}

impl<'a> SiteContext<'a> {
    pub fn new(config: &'a SiteConfig, store: &'a ContentStore) -> Result<Self, ContentError> {
        let business = store.primary_business(config.primary_business.as_deref())?;
        Ok(Self {
            config,
            store,
            business,
        })
    }

    pub fn url(&self, path: &str) -> String {
        self.config.absolute_url(path)
    }
}

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Profile,
    Article,
    Business,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Profile => "profile",
            OgType::Article => "article",
            OgType::Business => "business.business",
        }
    }
}

/// Social preview fields (`og:*` meta tags).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub og_type: OgType,
    pub locale: String,
    pub site_name: String,
    /// Absolute URL of the page.
    pub url: String,
    pub image: Option<String>,
    pub published_time: Option<NaiveDate>,
    pub modified_time: Option<NaiveDate>,
    pub authors: Vec<String>,
}

/// Metadata rendered into a page's `<head>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Site-relative canonical path (`/business/{slug}`).
    pub canonical: Option<String>,
    pub authors: Vec<String>,
    pub open_graph: Option<OpenGraph>,
}

impl PageMetadata {
    /// Fallback bundle for a route that did not resolve.
    pub fn not_found(collection: Option<Collection>) -> Self {
        let title = match collection {
            Some(Collection::Business) => BUSINESS_NOT_FOUND,
            Some(Collection::Blog) => POST_NOT_FOUND,
            None => PAGE_NOT_FOUND,
        };
        Self {
            title: title.to_string(),
            description: None,
            keywords: Vec::new(),
            canonical: None,
            authors: Vec::new(),
            open_graph: None,
        }
    }
}

/// Metadata for a resolved page.
pub fn for_page(ctx: &SiteContext<'_>, page: &Page<'_>) -> PageMetadata {
    match page {
        Page::Home => home(ctx),
        Page::About => about(ctx),
        Page::Faq => faq(ctx),
        Page::BlogIndex => blog_index(ctx),
        Page::BlogPost(post) => blog_post(ctx, Some(*post)),
        Page::Business(business) => business_profile(ctx, Some(*business)),
    }
}

pub fn home(ctx: &SiteContext<'_>) -> PageMetadata {
    let b = ctx.business;
    let title = format!("{} - {} Real Estate Expert", b.name, b.area_served);
    let description = format!(
        "{} Serving the entire {}. Available 24/7 for all your real estate needs.",
        b.tagline, b.area_served
    );
    let keywords = merge_keywords(
        &ctx.config.seo.keywords,
        [
            ctx.config.agent.name.as_str(),
            b.name.as_str(),
            b.address.address_locality.as_str(),
        ],
    );
    static_page(ctx, title, description, b.tagline.clone(), OgType::Website, "/", keywords)
}

pub fn about(ctx: &SiteContext<'_>) -> PageMetadata {
    let agent = &ctx.config.agent;
    let title = format!("About {} - {}", agent.name, ctx.config.site.name);
    let keywords = merge_keywords(
        &ctx.config.seo.keywords,
        [agent.name.as_str(), ctx.business.address.address_locality.as_str()],
    );
    static_page(
        ctx,
        title,
        agent.bio.clone(),
        agent.bio.clone(),
        OgType::Profile,
        "/about",
        keywords,
    )
}

pub fn faq(ctx: &SiteContext<'_>) -> PageMetadata {
    let b = ctx.business;
    let title = format!("FAQ - {} | Common Real Estate Questions", b.name);
    let description = format!(
        "Frequently asked questions about working with {} in the {}. Learn about timelines, marketing strategies, and technology.",
        b.name, b.area_served
    );
    let keywords = merge_keywords(
        &ctx.config.seo.keywords,
        ["real estate FAQ", b.area_served.as_str()],
    );
    let og_description = format!(
        "Get answers to common questions about buying and selling real estate in the {}.",
        b.area_served
    );
    static_page(ctx, title, description, og_description, OgType::Website, "/faq", keywords)
}

pub fn blog_index(ctx: &SiteContext<'_>) -> PageMetadata {
    let area = &ctx.business.area_served;
    let title = format!("Real Estate Blog - {area} Market Insights");
    let keywords = merge_keywords(&ctx.config.seo.keywords, ["real estate blog", area.as_str()]);
    let description = ctx.config.site.description.clone();
    static_page(
        ctx,
        title,
        description.clone(),
        description,
        OgType::Website,
        "/blog",
        keywords,
    )
}

/// Metadata for a blog post, or the not-found bundle when `post` is `None`.
pub fn blog_post(ctx: &SiteContext<'_>, post: Option<&BlogPostRecord>) -> PageMetadata {
    let Some(post) = post else {
        return PageMetadata::not_found(Some(Collection::Blog));
    };
    let canonical = Collection::Blog.record_path(&post.slug);
    let authors = vec![post.author.clone()];
    PageMetadata {
        title: format!("{} | {} Blog", post.title, ctx.config.site.name),
        description: Some(truncate_description(
            &post.description,
            ctx.config.seo.description_limit,
        )),
        keywords: merge_keywords(&ctx.config.seo.keywords, [post.category.as_str()]),
        open_graph: Some(OpenGraph {
            title: post.title.clone(),
            description: post.excerpt.clone(),
            og_type: OgType::Article,
            locale: ctx.config.site.locale.clone(),
            site_name: ctx.config.site.name.clone(),
            url: ctx.url(&canonical),
            image: post.image.as_deref().map(|img| ctx.url(img)),
            published_time: Some(post.publish_date),
            modified_time: Some(post.modified_date),
            authors: authors.clone(),
        }),
        canonical: Some(canonical),
        authors,
    }
}

/// Metadata for a business profile, or the not-found bundle when `business`
/// is `None`.
pub fn business_profile(ctx: &SiteContext<'_>, business: Option<&BusinessRecord>) -> PageMetadata {
    let Some(b) = business else {
        return PageMetadata::not_found(Some(Collection::Business));
    };
    let canonical = Collection::Business.record_path(&b.slug);
    let description = format!("Contact {} at {}. {}", b.name, b.phone, b.description);
    PageMetadata {
        title: format!("{} - Contact & Location | {}", b.name, b.area_served),
        description: Some(truncate_description(
            &description,
            ctx.config.seo.description_limit,
        )),
        keywords: merge_keywords(
            &ctx.config.seo.keywords,
            [
                b.name.as_str(),
                b.area_served.as_str(),
                "contact",
                "location",
                b.address.address_locality.as_str(),
            ],
        ),
        open_graph: Some(OpenGraph {
            title: format!("{} - {} Real Estate", b.name, b.area_served),
            description: b.tagline.clone(),
            og_type: OgType::Business,
            locale: ctx.config.site.locale.clone(),
            site_name: ctx.config.site.name.clone(),
            url: ctx.url(&canonical),
            image: b.image.clone(),
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
        }),
        canonical: Some(canonical),
        authors: Vec::new(),
    }
}

fn static_page(
    ctx: &SiteContext<'_>,
    title: String,
    description: String,
    og_description: String,
    og_type: OgType,
    path: &str,
    keywords: Vec<String>,
) -> PageMetadata {
    PageMetadata {
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: og_description,
            og_type,
            locale: ctx.config.site.locale.clone(),
            site_name: ctx.config.site.name.clone(),
            url: ctx.url(path),
            image: ctx.business.image.clone(),
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
        }),
        title,
        description: Some(truncate_description(
            &description,
            ctx.config.seo.description_limit,
        )),
        keywords,
        canonical: Some(path.to_string()),
        authors: Vec::new(),
    }
}

/// Site-wide keywords followed by page terms, de-duplicated ignoring case.
pub fn merge_keywords<'a>(
    site: &'a [String],
    page: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    site.iter()
        .map(String::as_str)
        .chain(page)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Shorten `text` to at most `limit` characters, ending in `...`.
///
/// Cuts at the last word boundary that fits when there is one. A limit too
/// small to hold the ellipsis gets a plain cut.
pub fn truncate_description(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= 3 {
        return text.chars().take(limit).collect();
    }
    let keep = limit.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &head[..pos],
        _ => head.as_str(),
    };
    format!("{}...", cut.trim_end())
}
