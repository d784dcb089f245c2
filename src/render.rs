//! HTML page rendering.
//!
//! Every page is a full HTML document built with [maud](https://maud.lambda.xyz/)
//! from three inputs: the resolved [`Page`], its [`PageMetadata`] and its
//! [`JsonLd`] objects. Record text is escaped by maud; the only raw HTML is the
//! stylesheet, the markdown-rendered about page and the JSON-LD bodies (which
//! are escaped separately, see [`JsonLd::to_script_body`]).
//!
//! ## Pages
//!
//! - **Home**: hero, stats, services, testimonials, quick links, social links
//! - **About**: `about.md` rendered from markdown, or the configured agent bio
//! - **FAQ**: one collapsible entry per question
//! - **Blog index**: a card per post
//! - **Blog post**: typed content blocks plus up to two related posts
//! - **Business**: NAP block with microdata, services, testimonials, contact CTA
//! - **Not found**: fallback metadata, links back into the site
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined in every page.

use crate::content::{BlogPostRecord, BusinessRecord, Collection, ContentBlock, Testimonial};
use crate::metadata::{self, PageMetadata, SiteContext, truncate_description};
use crate::resolve::{NotFound, Page, Route, resolve};
use crate::schema::{self, JsonLd};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS: &str = include_str!("../static/style.css");

/// Number of other posts linked below a blog post.
const RELATED_POSTS: usize = 2;

/// A top-level navigation link.
struct NavLink {
    label: &'static str,
    path: &'static str,
}

const NAV_LINKS: [NavLink; 4] = [
    NavLink { label: "Home", path: "/" },
    NavLink { label: "About", path: "/about" },
    NavLink { label: "Blog", path: "/blog" },
    NavLink { label: "FAQ", path: "/faq" },
];

/// Render the page at `route`.
///
/// A route that does not resolve renders the not-found page; the caller gets
/// both the reason and the markup.
pub fn render_route(ctx: &SiteContext<'_>, route: &Route) -> Result<Markup, (NotFound, Markup)> {
    match resolve(ctx.store, route) {
        Ok(page) => Ok(render_page(ctx, &page)),
        Err(not_found) => {
            let markup = render_not_found(ctx, &not_found);
            Err((not_found, markup))
        }
    }
}

/// Render a resolved page with its metadata and structured data.
pub fn render_page(ctx: &SiteContext<'_>, page: &Page<'_>) -> Markup {
    let meta = metadata::for_page(ctx, page);
    let json_ld = schema::for_page(ctx, page);
    let (body_class, current, content) = match page {
        Page::Home => ("home-page", "/", render_home(ctx)),
        Page::About => ("about-page", "/about", render_about(ctx)),
        Page::Faq => ("faq-page", "/faq", render_faq(ctx)),
        Page::BlogIndex => ("blog-page", "/blog", render_blog_index(ctx)),
        Page::BlogPost(post) => ("post-page", "/blog", render_post(ctx, post)),
        Page::Business(business) => ("business-page", "", render_business(ctx, business)),
    };
    base_document(ctx, &meta, &json_ld, body_class, current, content)
}

/// The not-found page for a route that did not resolve.
pub fn render_not_found(ctx: &SiteContext<'_>, not_found: &NotFound) -> Markup {
    let meta = PageMetadata::not_found(not_found.collection());
    let message = match not_found.collection() {
        Some(Collection::Business) => "We couldn't find that business profile.",
        Some(Collection::Blog) => "We couldn't find that blog post.",
        None => "The page you're looking for doesn't exist.",
    };
    let content = html! {
        header.header {
            div.container {
                h1 { (meta.title) }
            }
        }
        main.container {
            section.section {
                div.card {
                    p { (message) }
                    div.button-row {
                        a.btn href="/" { "Back to Home" }
                        a.btn href="/blog" { "Read the Blog" }
                    }
                }
            }
        }
    };
    base_document(ctx, &meta, &[], "not-found-page", "", content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    ctx: &SiteContext<'_>,
    meta: &PageMetadata,
    json_ld: &[JsonLd],
    body_class: &str,
    current_path: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(ctx.config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                @if let Some(description) = &meta.description {
                    meta name="description" content=(description);
                }
                @if !meta.keywords.is_empty() {
                    meta name="keywords" content=(meta.keywords.join(", "));
                }
                @for author in &meta.authors {
                    meta name="author" content=(author);
                }
                @if let Some(canonical) = &meta.canonical {
                    meta name="robots" content="index, follow";
                    link rel="canonical" href=(ctx.url(canonical));
                } @else {
                    meta name="robots" content="noindex";
                }
                (open_graph_tags(meta))
                style { (PreEscaped(CSS)) }
                @for doc in json_ld {
                    script type="application/ld+json" { (PreEscaped(doc.to_script_body())) }
                }
            }
            body class=(body_class) {
                (site_nav(ctx, current_path))
                (content)
                (site_footer(ctx))
            }
        }
    }
}

fn open_graph_tags(meta: &PageMetadata) -> Markup {
    let Some(og) = &meta.open_graph else {
        return html! {};
    };
    html! {
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:type" content=(og.og_type.as_str());
        meta property="og:locale" content=(og.locale);
        meta property="og:site_name" content=(og.site_name);
        meta property="og:url" content=(og.url);
        @if let Some(image) = &og.image {
            meta property="og:image" content=(image);
        }
        @if let Some(published) = og.published_time {
            meta property="article:published_time" content=(published);
        }
        @if let Some(modified) = og.modified_time {
            meta property="article:modified_time" content=(modified);
        }
        @for author in &og.authors {
            meta property="article:author" content=(author);
        }
    }
}

/// Site navigation. `current_path` marks the active link.
fn site_nav(ctx: &SiteContext<'_>, current_path: &str) -> Markup {
    let b = ctx.business;
    html! {
        nav.site-navigation {
            div.nav-container {
                a.nav-brand href="/" {
                    span.brand-name { (ctx.config.agent.name) }
                    span.brand-tagline { "Real Estate" }
                }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Toggle menu" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                ul.nav-links {
                    @for link in &NAV_LINKS {
                        @let is_current = link.path == current_path;
                        li class=[is_current.then_some("current")] {
                            a.nav-link href=(link.path) { (link.label) }
                        }
                    }
                    li {
                        a.nav-cta href={ "tel:" (b.phone_digits()) } {
                            "Call Now: " (b.phone)
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &SiteContext<'_>) -> Markup {
    let b = ctx.business;
    html! {
        footer.footer {
            p { "© " (ctx.config.site.name) ". All rights reserved." }
            p {
                a href={ "tel:" (b.phone_digits()) } { (b.phone) }
                @if let Some(email) = &b.email {
                    " • "
                    a href={ "mailto:" (email) } { (email) }
                }
            }
        }
    }
}

fn page_header(title: &str, subtitle: Option<&str>) -> Markup {
    html! {
        header.header {
            div.container {
                h1 { (title) }
                @if let Some(subtitle) = subtitle {
                    p.subtitle { (subtitle) }
                }
            }
        }
    }
}

fn services_grid(services: &[String]) -> Markup {
    html! {
        div.services-grid {
            @for service in services {
                div.service-item { (service) }
            }
        }
    }
}

fn testimonials_grid(testimonials: &[Testimonial]) -> Markup {
    html! {
        div.testimonials-grid {
            @for t in testimonials {
                div.testimonial-card {
                    div.testimonial-rating aria-label={ (t.rating) " out of 5" } {
                        ("★".repeat(usize::from(t.rating.min(5))))
                    }
                    p.testimonial-text { (t.text) }
                    div.testimonial-author {
                        div.testimonial-author-name { (t.author) }
                        @if !t.title.is_empty() {
                            div.testimonial-author-title { (t.title) }
                        }
                    }
                }
            }
        }
    }
}

/// Outbound profile links plus the official website.
fn social_links(business: &BusinessRecord) -> Markup {
    html! {
        div.social-links {
            @for url in &business.same_as {
                a.social-link href=(url) target="_blank" rel="noopener noreferrer" {
                    (social_label(url)) " →"
                }
            }
            @if let Some(website) = business.website_url() {
                a.social-link href=(website) target="_blank" rel="noopener noreferrer" {
                    "Official Website →"
                }
            }
        }
    }
}

fn social_label(url: &str) -> &'static str {
    let lower = url.to_ascii_lowercase();
    [
        ("facebook.", "Facebook"),
        ("instagram.", "Instagram"),
        ("linkedin.", "LinkedIn"),
        ("youtube.", "YouTube"),
        ("zillow.", "Zillow"),
    ]
    .iter()
    .find(|(host, _)| lower.contains(*host))
    .map_or("Profile", |(_, label)| *label)
}

/// Call and email buttons for a business.
fn contact_cta(business: &BusinessRecord) -> Markup {
    html! {
        section.section {
            div.card.cta-card {
                h2 { "Ready to Get Started?" }
                p { "Reach out today to talk about buying or selling in the " (business.area_served) "." }
                div.button-row {
                    a.btn href={ "tel:" (business.phone_digits()) } { "Call " (business.phone) }
                    @if let Some(email) = &business.email {
                        a.btn.btn-secondary href={ "mailto:" (email) } { "Send an Email" }
                    }
                }
            }
        }
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Category • 8 min read`, or just the category when there is no read time.
fn post_kicker(post: &BlogPostRecord) -> String {
    match &post.read_time {
        Some(read_time) => format!("{} • {}", post.category, read_time),
        None => post.category.clone(),
    }
}

fn post_card(post: &BlogPostRecord, excerpt: &str) -> Markup {
    let href = Collection::Blog.record_path(&post.slug);
    html! {
        article.card.post-card {
            div.post-kicker { (post_kicker(post)) }
            h3 { a href=(href) { (post.title) } }
            p.post-excerpt { (excerpt) }
            div.post-meta {
                time datetime=(post.publish_date) { (display_date(post.publish_date)) }
            }
            a.read-more href=(href) { "Read More →" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &SiteContext<'_>) -> Markup {
    let b = ctx.business;
    html! {
        section.hero-section {
            div.container {
                h1 { (b.name) }
                p.tagline { (b.tagline) }
                p.description { (b.description) }
                a.btn href=(Collection::Business.record_path(&b.slug)) { "Get in Touch →" }
            }
        }
        main.container {
            @if !b.stats.is_empty() {
                section.section {
                    div.stats-grid {
                        @for stat in &b.stats {
                            div.stat-card {
                                div.stat-number { (stat.number) }
                                div.stat-label { (stat.label) }
                            }
                        }
                    }
                }
            }
            @if !b.services.is_empty() {
                section.section {
                    h2.section-title { "My Services" }
                    (services_grid(&b.services))
                }
            }
            @if !b.testimonials.is_empty() {
                section.section {
                    h2.section-title { "What Clients Say" }
                    (testimonials_grid(&b.testimonials))
                }
            }
            section.section {
                h2.section-title { "Quick Links" }
                div.button-row {
                    a.btn href=(Collection::Business.record_path(&b.slug)) { "Contact & Location" }
                    a.btn href="/faq" { "Common Questions (FAQ)" }
                    a.btn href="/blog" { "Market Insights" }
                }
            }
            @if !b.same_as.is_empty() || b.website.is_some() {
                section.section {
                    h2.section-title { "Connect With Me" }
                    (social_links(b))
                }
            }
            section.section {
                h2.section-title { "Serving the Entire " (b.area_served) }
                div.card {
                    p {
                        "Working with buyers and sellers throughout the " (b.area_served)
                        ", from " (b.address.address_locality) " and beyond."
                    }
                }
            }
        }
    }
}

fn render_about(ctx: &SiteContext<'_>) -> Markup {
    let agent = &ctx.config.agent;
    let title = format!("About {}", agent.name);
    html! {
        (page_header(&title, Some(agent.job_title.as_str())))
        main.container {
            section.section {
                div.card.about-body {
                    @if let Some(markdown) = &ctx.store.about {
                        (PreEscaped(markdown_to_html(markdown)))
                    } @else {
                        p { (agent.bio) }
                    }
                }
            }
            @if !agent.knows_about.is_empty() {
                section.section {
                    h2.section-title { "Areas of Expertise" }
                    (services_grid(&agent.knows_about))
                }
            }
            (contact_cta(ctx.business))
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn render_faq(ctx: &SiteContext<'_>) -> Markup {
    let b = ctx.business;
    let subtitle = format!("Working with {} in the {}", b.name, b.area_served);
    html! {
        (page_header("Frequently Asked Questions", Some(subtitle.as_str())))
        main.container {
            section.section {
                @if ctx.store.faq.is_empty() {
                    div.card { p { "No questions have been published yet." } }
                }
                @for entry in &ctx.store.faq {
                    details.faq-item {
                        summary { (entry.question) }
                        p { (entry.answer) }
                    }
                }
            }
            (contact_cta(b))
        }
    }
}

fn render_blog_index(ctx: &SiteContext<'_>) -> Markup {
    let subtitle = format!("{} market insights and advice", ctx.business.area_served);
    html! {
        (page_header("Real Estate Blog", Some(subtitle.as_str())))
        main.container {
            section.section {
                @if ctx.store.posts.is_empty() {
                    div.card { p { "No posts yet." } }
                } @else {
                    div.post-grid {
                        @for post in &ctx.store.posts {
                            (post_card(post, &post.excerpt))
                        }
                    }
                }
            }
        }
    }
}

fn render_post(ctx: &SiteContext<'_>, post: &BlogPostRecord) -> Markup {
    let related: Vec<&BlogPostRecord> = ctx
        .store
        .posts
        .iter()
        .filter(|p| p.slug != post.slug)
        .take(RELATED_POSTS)
        .collect();

    html! {
        header.header {
            div.container {
                div.post-kicker { (post_kicker(post)) }
                h1 { (post.title) }
                div.byline {
                    "By " (post.author) " • Published "
                    time datetime=(post.publish_date) { (display_date(post.publish_date)) }
                    @if post.modified_date != post.publish_date {
                        " • Updated "
                        time datetime=(post.modified_date) { (display_date(post.modified_date)) }
                    }
                }
            }
        }
        main.container {
            nav.breadcrumb aria-label="Breadcrumb" {
                a href="/" { "Home" }
                span.separator { "→" }
                a href="/blog" { "Blog" }
                span.separator { "→" }
                span { (post.category) }
            }
            article.post-body {
                div.card.post-excerpt-card {
                    p { (post.excerpt) }
                }
                @for block in &post.content {
                    (render_block(block))
                }
            }
            @if !related.is_empty() {
                section.section.related-posts {
                    h2.section-title { "Related Articles" }
                    div.post-grid {
                        @for other in &related {
                            (post_card(other, &truncate_description(&other.excerpt, 150)))
                        }
                    }
                }
            }
            (contact_cta(ctx.business))
        }
    }
}

/// One post body block. Unknown block types render as nothing.
fn render_block(block: &ContentBlock) -> Markup {
    match block {
        ContentBlock::Paragraph { text } => html! { p { (text) } },
        ContentBlock::Heading { level: 2, text } => html! { h2 { (text) } },
        ContentBlock::Heading { text, .. } => html! { h3 { (text) } },
        ContentBlock::List { items } => html! {
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        },
        ContentBlock::Unknown => html! {},
    }
}

fn render_business(ctx: &SiteContext<'_>, b: &BusinessRecord) -> Markup {
    html! {
        (page_header(&b.name, Some(b.tagline.as_str())))
        main.container {
            section.section {
                h2.section-title { "About " (b.name) }
                div.card { p { (b.description) } }
            }
            section.section {
                h2.section-title { "Contact Information" }
                div.card { (nap_block(b)) }
            }
            @if !b.services.is_empty() {
                section.section {
                    h2.section-title { "Services Offered" }
                    (services_grid(&b.services))
                }
            }
            @if !b.testimonials.is_empty() {
                section.section {
                    h2.section-title { "Client Testimonials" }
                    (testimonials_grid(&b.testimonials))
                }
            }
            @if !ctx.store.faq.is_empty() {
                section.section {
                    h2.section-title { "Frequently Asked Questions" }
                    div.card {
                        p { "Answers about timelines, pricing and the buying process." }
                        a.btn href=(Route::Faq.path()) { "View All FAQs" }
                    }
                }
            }
            @if !b.same_as.is_empty() || b.website.is_some() {
                section.section {
                    h2.section-title { "Connect on Social Media" }
                    (social_links(b))
                }
            }
            (contact_cta(b))
        }
    }
}

/// Name, address and phone with schema.org microdata.
fn nap_block(b: &BusinessRecord) -> Markup {
    let a = &b.address;
    let hours = b
        .opening_hours_display
        .as_deref()
        .or(b.opening_hours.as_deref());
    html! {
        div.nap-block itemscope itemtype="https://schema.org/LocalBusiness" {
            h2.sr-only itemprop="name" { (b.name) }
            div.contact-section {
                div.contact-item itemprop="address" itemscope itemtype="https://schema.org/PostalAddress" {
                    strong { "Address:" }
                    address {
                        span itemprop="streetAddress" { (a.street_address) }
                        br;
                        span itemprop="addressLocality" { (a.address_locality) }
                        ", "
                        span itemprop="addressRegion" { (a.address_region) }
                        " "
                        span itemprop="postalCode" { (a.postal_code) }
                    }
                    @if let Some(map_link) = &b.map_link {
                        a.map-link href=(map_link) target="_blank" rel="noopener noreferrer" {
                            "View on Google Maps →"
                        }
                    }
                }
                div.contact-item {
                    strong { "Phone:" }
                    a href={ "tel:" (b.phone_digits()) } itemprop="telephone" { (b.phone) }
                }
                @if let Some(email) = &b.email {
                    div.contact-item {
                        strong { "Email:" }
                        a href={ "mailto:" (email) } itemprop="email" { (email) }
                    }
                }
                @if let Some(hours) = hours {
                    div.contact-item {
                        strong { "Hours:" }
                        span itemprop="openingHours" { (hours) }
                    }
                }
            }
        }
    }
}
