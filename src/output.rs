//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what an entity *is* (its name or title and positional
//! index); files and routes follow as indented context lines. The `check`
//! listing reads as a content inventory and the `build` listing maps each
//! page to the file it produced.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Businesses
//! 001 Brenda Devlin Real Estate (RealEstateAgent)
//!     Route: /business/brenda-devlin-real-estate
//!     Services: 5, testimonials: 2
//!
//! Blog posts
//! 001 Coachella Valley Market Report: Fall 2025
//!     Route: /blog/coachella-valley-market-report-2025
//!     Market Report, modified 2025-10-01
//!
//! FAQ
//!     4 questions
//!
//! Config
//!     Site: Brenda Devlin Real Estate (https://brendadevlin.com)
//!     Primary business: brenda-devlin-real-estate
//!     Crawler rules: 17 (7 disallowed), default allow
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Brenda Devlin Real Estate - Coachella Valley Real Estate Expert → index.html
//! 002 About Brenda Devlin - Brenda Devlin Real Estate → about/index.html
//!
//! Site files
//!     404.html
//!     sitemap.xml (9 entries)
//!     robots.txt
//!
//! Assets
//!     favicon.svg
//!
//! Generated 9 pages, 3 site files, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::{Access, SiteConfig};
use crate::content::{ABOUT_FILE, Collection, ContentStore};
use crate::generate::{GenerateReport, SITEMAP_FILE};
use crate::metadata::SiteContext;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_title(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// check
// ============================================================================

/// Content inventory: every record with its route, plus the effective config.
pub fn format_check_output(ctx: &SiteContext<'_>) -> Vec<String> {
    let (config, store) = (ctx.config, ctx.store);
    let mut lines = Vec::new();

    lines.push("Businesses".to_string());
    for (i, b) in store.businesses.iter().enumerate() {
        lines.push(format!(
            "{} {} ({:?})",
            format_index(i + 1),
            b.name,
            b.business_type
        ));
        lines.push(format!(
            "{}Route: {}",
            indent(1),
            Collection::Business.record_path(&b.slug)
        ));
        lines.push(format!(
            "{}Services: {}, testimonials: {}",
            indent(1),
            b.services.len(),
            b.testimonials.len()
        ));
    }

    lines.push(String::new());
    lines.push("Blog posts".to_string());
    if store.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in store.posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), truncate_title(&post.title, 72)));
        lines.push(format!(
            "{}Route: {}",
            indent(1),
            Collection::Blog.record_path(&post.slug)
        ));
        lines.push(format!(
            "{}{}, modified {}",
            indent(1),
            post.category,
            post.modified_date
        ));
    }

    lines.push(String::new());
    lines.push("FAQ".to_string());
    lines.push(format!(
        "{}{}",
        indent(1),
        plural(store.faq.len(), "question", "questions")
    ));

    lines.push(String::new());
    lines.push("Pages".to_string());
    lines.extend(format_about_source(store));

    lines.push(String::new());
    lines.extend(format_config_summary(config, &ctx.business.slug));
    lines
}

fn format_about_source(store: &ContentStore) -> Vec<String> {
    match store.about {
        Some(_) => vec![format!("{}About: {}", indent(1), ABOUT_FILE)],
        None => vec![format!("{}About: agent bio from config", indent(1))],
    }
}

fn format_config_summary(config: &SiteConfig, primary_slug: &str) -> Vec<String> {
    let disallowed = config
        .crawlers
        .rules
        .iter()
        .filter(|r| r.access == Access::Disallow)
        .count();
    vec![
        "Config".to_string(),
        format!(
            "{}Site: {} ({})",
            indent(1),
            config.site.name,
            config.site.base_url
        ),
        format!("{}Primary business: {}", indent(1), primary_slug),
        format!(
            "{}Crawler rules: {} ({} disallowed), default {}",
            indent(1),
            config.crawlers.rules.len(),
            disallowed,
            config.crawlers.default.directive().to_lowercase()
        ),
    ]
}

pub fn print_check_output(ctx: &SiteContext<'_>) {
    for line in format_check_output(ctx) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Generated files: pages with their titles, then site files and assets.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            truncate_title(&page.title, 72),
            page.file.display()
        ));
    }

    lines.push(String::new());
    lines.push("Site files".to_string());
    for file in &report.site_files {
        if file.as_os_str() == SITEMAP_FILE {
            lines.push(format!(
                "{}{} ({})",
                indent(1),
                file.display(),
                plural(report.sitemap_entries, "entry", "entries")
            ));
        } else {
            lines.push(format!("{}{}", indent(1), file.display()));
        }
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset.display()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.site_files.len(), "site file", "site files"),
        plural(report.assets.len(), "asset", "assets")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// robots
// ============================================================================

/// `GPTBot: disallow (rule)` or `SomeNewBot: allow (default)`.
pub fn format_crawler_verdict(config: &SiteConfig, user_agent: &str, access: Access) -> String {
    let source = if config.crawlers.rules.iter().any(|r| r.user_agent == user_agent) {
        "rule"
    } else {
        "default"
    };
    format!(
        "{}: {} ({})",
        user_agent,
        access.directive().to_lowercase(),
        source
    )
}
