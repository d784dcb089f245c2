//! schema.org structured data (JSON-LD).
//!
//! Each page embeds one or more self-contained [`JsonLd`] objects, one per
//! semantic facet of the page:
//!
//! | Page | Objects |
//! |------|---------|
//! | home | business (`RealEstateAgent` / `LocalBusiness` / `Organization`), `WebSite` |
//! | about | `Person`, `BreadcrumbList` |
//! | FAQ | `FAQPage`, `BreadcrumbList` |
//! | blog index | `Blog`, `BreadcrumbList` |
//! | blog post | `BlogPosting`, `BreadcrumbList` |
//! | business | business, `Person`, `Service`, `BreadcrumbList` |
//!
//! Objects are never merged. Values that come from optional record fields are
//! `Option`s skipped when absent, so the output never contains `null`.
//!
//! ## Typing
//!
//! Top-level objects are variants of [`Node`], internally tagged by `@type`.
//! Nested values (`PostalAddress`, `ListItem`, ...) are plain structs tagged
//! with their schema.org type name. Everything derives `Deserialize` as well,
//! so emitted JSON parses back into an equal value.

use crate::content::{BlogPostRecord, BusinessRecord, BusinessType, Collection, FaqEntry};
use crate::metadata::SiteContext;
use crate::resolve::Page;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// A complete JSON-LD document: `@context` plus one typed node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLd {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(flatten)]
    pub node: Node,
}

impl JsonLd {
    pub fn new(node: Node) -> Self {
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            node,
        }
    }

    /// Compact JSON text.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("structured data has only string keys")
    }

    /// JSON text safe to place inside `<script type="application/ld+json">`.
    ///
    /// `</` is written as `<\/` so no string value can close the element.
    pub fn to_script_body(&self) -> String {
        self.to_json().replace("</", "<\\/")
    }

    /// The schema.org type name of the node.
    pub fn type_name(&self) -> &'static str {
        self.node.type_name()
    }
}

/// Top-level schema.org objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Node {
    Person(Person),
    RealEstateAgent(Business),
    LocalBusiness(Business),
    Organization(Business),
    Service(Service),
    WebSite(WebSite),
    Blog(Blog),
    BlogPosting(BlogPosting),
    #[serde(rename = "FAQPage")]
    FaqPage(FaqPage),
    BreadcrumbList(BreadcrumbList),
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Person(_) => "Person",
            Node::RealEstateAgent(_) => "RealEstateAgent",
            Node::LocalBusiness(_) => "LocalBusiness",
            Node::Organization(_) => "Organization",
            Node::Service(_) => "Service",
            Node::WebSite(_) => "WebSite",
            Node::Blog(_) => "Blog",
            Node::BlogPosting(_) => "BlogPosting",
            Node::FaqPage(_) => "FAQPage",
            Node::BreadcrumbList(_) => "BreadcrumbList",
        }
    }

    fn business(kind: BusinessType, business: Business) -> Self {
        match kind {
            BusinessType::RealEstateAgent => Node::RealEstateAgent(business),
            BusinessType::LocalBusiness => Node::LocalBusiness(business),
            BusinessType::Organization => Node::Organization(business),
        }
    }
}

// ============================================================================
// Nested values
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "PostalAddress", rename_all = "camelCase")]
pub struct PostalAddress {
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

impl PostalAddress {
    fn from_record(b: &BusinessRecord) -> Self {
        let a = &b.address;
        Self {
            street_address: a.street_address.clone(),
            address_locality: a.address_locality.clone(),
            address_region: a.address_region.clone(),
            postal_code: a.postal_code.clone(),
            address_country: a.address_country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "GeoCoordinates")]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "City")]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "OpeningHoursSpecification", rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    pub day_of_week: Vec<String>,
    pub opens: String,
    pub closes: String,
}

/// A reference to another entity, typed by `@type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Entity {
    Person(EntityRef),
    Organization(EntityRef),
    RealEstateAgent(EntityRef),
    LocalBusiness(EntityRef),
    WebPage(EntityRef),
}

impl Entity {
    fn business(kind: BusinessType, reference: EntityRef) -> Self {
        match kind {
            BusinessType::RealEstateAgent => Entity::RealEstateAgent(reference),
            BusinessType::LocalBusiness => Entity::LocalBusiness(reference),
            BusinessType::Organization => Entity::Organization(reference),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EntityRef {
    fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "ListItem")]
pub struct ListItem {
    pub position: u32,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "OfferCatalog", rename_all = "camelCase")]
pub struct OfferCatalog {
    pub name: String,
    pub item_list_element: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "Offer", rename_all = "camelCase")]
pub struct Offer {
    pub item_offered: OfferedService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "Service")]
pub struct OfferedService {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "Question", rename_all = "camelCase")]
pub struct Question {
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "Answer")]
pub struct Answer {
    pub text: String,
}

/// Short `BlogPosting` nested in a [`Blog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename = "BlogPosting", rename_all = "camelCase")]
pub struct BlogPostingSummary {
    pub headline: String,
    pub description: String,
    pub url: String,
    pub date_published: NaiveDate,
    pub date_modified: NaiveDate,
    pub author: Entity,
}

// ============================================================================
// Top-level objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub telephone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: PostalAddress,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub knows_about: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_of: Option<Entity>,
}

/// Local-business facet of a business record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub telephone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    pub address: PostalAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours_specification: Option<OpeningHoursSpecification>,
    pub area_served: City,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_map: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_type: String,
    pub provider: Entity,
    pub area_served: City,
    pub has_offer_catalog: OfferCatalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    pub name: String,
    pub url: String,
    pub description: String,
    pub in_language: String,
    pub publisher: Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub name: String,
    pub description: String,
    pub url: String,
    pub author: Entity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blog_post: Vec<BlogPostingSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPosting {
    pub headline: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub date_published: NaiveDate,
    pub date_modified: NaiveDate,
    pub author: Entity,
    pub publisher: Entity,
    pub main_entity_of_page: Entity,
    pub article_section: String,
    pub in_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    pub item_list_element: Vec<ListItem>,
}

// ============================================================================
// Synthesis
// ============================================================================

/// All structured data objects for a resolved page.
pub fn for_page(ctx: &SiteContext<'_>, page: &Page<'_>) -> Vec<JsonLd> {
    let nodes = match page {
        Page::Home => home(ctx),
        Page::About => about(ctx),
        Page::Faq => faq(ctx),
        Page::BlogIndex => blog_index(ctx),
        Page::BlogPost(post) => blog_post(ctx, post),
        Page::Business(business) => business_profile(ctx, business),
    };
    nodes.into_iter().map(JsonLd::new).collect()
}

fn home(ctx: &SiteContext<'_>) -> Vec<Node> {
    let b = ctx.business;
    let website = WebSite {
        name: b.name.clone(),
        url: b.website_url().unwrap_or_else(|| ctx.url("/")),
        description: b.description.clone(),
        in_language: ctx.config.site.language.clone(),
        publisher: Entity::business(b.business_type, EntityRef::named(&b.name)),
    };
    vec![business_node(ctx, b), Node::WebSite(website)]
}

fn about(ctx: &SiteContext<'_>) -> Vec<Node> {
    let agent = &ctx.config.agent;
    let person = Person {
        description: Some(agent.bio.clone()),
        url: Some(ctx.url("/about")),
        knows_about: agent.knows_about.clone(),
        member_of: Some(Entity::Organization(EntityRef::named(
            &ctx.config.site.name,
        ))),
        ..agent_person(ctx, ctx.business)
    };
    vec![
        Node::Person(person),
        Node::BreadcrumbList(breadcrumbs(ctx, &[("About", "/about")])),
    ]
}

fn faq(ctx: &SiteContext<'_>) -> Vec<Node> {
    let mut nodes = Vec::new();
    if !ctx.store.faq.is_empty() {
        nodes.push(Node::FaqPage(faq_page(&ctx.store.faq)));
    }
    nodes.push(Node::BreadcrumbList(breadcrumbs(ctx, &[("FAQ", "/faq")])));
    nodes
}

fn blog_index(ctx: &SiteContext<'_>) -> Vec<Node> {
    let posts = ctx
        .store
        .posts
        .iter()
        .map(|post| BlogPostingSummary {
            headline: post.title.clone(),
            description: post.excerpt.clone(),
            url: ctx.url(&Collection::Blog.record_path(&post.slug)),
            date_published: post.publish_date,
            date_modified: post.modified_date,
            author: Entity::Person(EntityRef::named(&post.author)),
        })
        .collect();
    let blog = Blog {
        name: format!("{} Blog", ctx.config.site.name),
        description: ctx.config.site.description.clone(),
        url: ctx.url("/blog"),
        author: agent_ref(ctx),
        blog_post: posts,
    };
    vec![
        Node::Blog(blog),
        Node::BreadcrumbList(breadcrumbs(ctx, &[("Blog", "/blog")])),
    ]
}

fn blog_post(ctx: &SiteContext<'_>, post: &BlogPostRecord) -> Vec<Node> {
    let path = Collection::Blog.record_path(&post.slug);
    let author = if post.author == ctx.config.agent.name {
        agent_ref(ctx)
    } else {
        Entity::Person(EntityRef::named(&post.author))
    };
    let posting = BlogPosting {
        headline: post.title.clone(),
        description: post.description.clone(),
        image: post.image.as_deref().map(|img| ctx.url(img)),
        date_published: post.publish_date,
        date_modified: post.modified_date,
        author,
        publisher: Entity::Organization(EntityRef {
            url: Some(ctx.url("/")),
            ..EntityRef::named(&ctx.config.site.name)
        }),
        main_entity_of_page: Entity::WebPage(EntityRef {
            id: Some(ctx.url(&path)),
            ..EntityRef::default()
        }),
        article_section: post.category.clone(),
        in_language: ctx.config.site.language.clone(),
    };
    vec![
        Node::BlogPosting(posting),
        Node::BreadcrumbList(breadcrumbs(
            ctx,
            &[("Blog", "/blog"), (post.title.as_str(), path.as_str())],
        )),
    ]
}

fn business_profile(ctx: &SiteContext<'_>, b: &BusinessRecord) -> Vec<Node> {
    let path = Collection::Business.record_path(&b.slug);
    let person = Person {
        description: Some(b.description.clone()),
        url: b.website_url(),
        ..agent_person(ctx, b)
    };
    let mut nodes = vec![business_node(ctx, b), Node::Person(person)];
    if let Some(service) = service(b) {
        nodes.push(Node::Service(service));
    }
    // No business index page exists, so the trail skips the collection.
    nodes.push(Node::BreadcrumbList(breadcrumbs(
        ctx,
        &[(b.name.as_str(), path.as_str())],
    )));
    nodes
}

fn business_node(ctx: &SiteContext<'_>, b: &BusinessRecord) -> Node {
    let business = Business {
        id: ctx.url(&Collection::Business.record_path(&b.slug)),
        name: b.name.clone(),
        description: b.description.clone(),
        image: b.image.clone(),
        url: b.website_url(),
        telephone: b.phone.clone(),
        email: b.email.clone(),
        price_range: b.price_range.clone(),
        address: PostalAddress::from_record(b),
        geo: b.geo.map(|g| GeoCoordinates {
            latitude: g.latitude,
            longitude: g.longitude,
        }),
        opening_hours: b.opening_hours.clone(),
        opening_hours_specification: b.opening_hours.as_deref().and_then(parse_opening_hours),
        area_served: City {
            name: b.area_served.clone(),
        },
        same_as: b.same_as.clone(),
        has_map: b.map_link.clone(),
    };
    Node::business(b.business_type, business)
}

/// Service catalog with one `Offer` per service; `None` when there are none.
fn service(b: &BusinessRecord) -> Option<Service> {
    if b.services.is_empty() {
        return None;
    }
    Some(Service {
        service_type: "Real Estate Services".to_string(),
        provider: Entity::business(b.business_type, EntityRef::named(&b.name)),
        area_served: City {
            name: b.area_served.clone(),
        },
        has_offer_catalog: OfferCatalog {
            name: "Real Estate Services".to_string(),
            item_list_element: b
                .services
                .iter()
                .map(|s| Offer {
                    item_offered: OfferedService { name: s.clone() },
                })
                .collect(),
        },
    })
}

fn faq_page(entries: &[FaqEntry]) -> FaqPage {
    FaqPage {
        main_entity: entries
            .iter()
            .map(|e| Question {
                name: e.question.clone(),
                accepted_answer: Answer {
                    text: e.answer.clone(),
                },
            })
            .collect(),
    }
}

/// The agent as a `Person`, with contact details from `b`.
fn agent_person(ctx: &SiteContext<'_>, b: &BusinessRecord) -> Person {
    Person {
        name: ctx.config.agent.name.clone(),
        job_title: ctx.config.agent.job_title.clone(),
        description: None,
        url: None,
        telephone: b.phone.clone(),
        email: b.email.clone(),
        address: PostalAddress::from_record(b),
        same_as: b.same_as.clone(),
        knows_about: Vec::new(),
        member_of: None,
    }
}

fn agent_ref(ctx: &SiteContext<'_>) -> Entity {
    Entity::Person(EntityRef {
        job_title: Some(ctx.config.agent.job_title.clone()),
        url: Some(ctx.url("/")),
        ..EntityRef::named(&ctx.config.agent.name)
    })
}

/// Home followed by `trail`, numbered from 1.
pub fn breadcrumbs(ctx: &SiteContext<'_>, trail: &[(&str, &str)]) -> BreadcrumbList {
    let items = std::iter::once(("Home", "/"))
        .chain(trail.iter().copied())
        .enumerate()
        .map(|(i, (name, path))| ListItem {
            position: i as u32 + 1,
            name: name.to_string(),
            item: ctx.url(path),
        })
        .collect();
    BreadcrumbList {
        item_list_element: items,
    }
}

const DAYS: [(&str, &str); 7] = [
    ("Mo", "Monday"),
    ("Tu", "Tuesday"),
    ("We", "Wednesday"),
    ("Th", "Thursday"),
    ("Fr", "Friday"),
    ("Sa", "Saturday"),
    ("Su", "Sunday"),
];

/// Parse the schema.org `openingHours` short form, e.g. `Mo-Su 00:00-23:59`
/// or `Mo,We,Fr 09:00-17:00`. Anything more elaborate yields `None`.
pub fn parse_opening_hours(text: &str) -> Option<OpeningHoursSpecification> {
    let (days, hours) = text.trim().split_once(' ')?;
    let (opens, closes) = hours.trim().split_once('-')?;
    if !is_clock_time(opens) || !is_clock_time(closes) {
        return None;
    }

    let day_index = |code: &str| DAYS.iter().position(|(c, _)| *c == code);
    let mut indices = Vec::new();
    for part in days.split(',') {
        match part.split_once('-') {
            Some((from, to)) => {
                let (from, to) = (day_index(from)?, day_index(to)?);
                if from > to {
                    return None;
                }
                indices.extend(from..=to);
            }
            None => indices.push(day_index(part)?),
        }
    }

    Some(OpeningHoursSpecification {
        day_of_week: indices.iter().map(|&i| DAYS[i].1.to_string()).collect(),
        opens: opens.to_string(),
        closes: closes.to_string(),
    })
}

fn is_clock_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{Route, resolve};
    use crate::test_helpers::*;

    fn json_of(ld: &JsonLd) -> serde_json::Value {
        serde_json::from_str(&ld.to_json()).unwrap()
    }

    #[test]
    fn business_page_emits_all_facets() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let b = business_by_slug(&store, "brenda-devlin-real-estate");
        let types: Vec<&str> = for_page(&ctx, &Page::Business(b))
            .iter()
            .map(JsonLd::type_name)
            .collect();
        assert_eq!(
            types,
            vec!["RealEstateAgent", "Person", "Service", "BreadcrumbList"]
        );
    }

    #[test]
    fn business_facet_fields() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let b = business_by_slug(&store, "brenda-devlin-real-estate");
        let docs = for_page(&ctx, &Page::Business(b));
        let v = json_of(&docs[0]);

        assert_eq!(v["@context"], "https://schema.org");
        assert_eq!(v["@type"], "RealEstateAgent");
        assert_eq!(
            v["@id"],
            "https://brendadevlin.com/business/brenda-devlin-real-estate"
        );
        assert_eq!(v["url"], "https://brendadevlin.com");
        assert_eq!(v["address"]["@type"], "PostalAddress");
        assert_eq!(v["address"]["addressLocality"], "Palm Desert");
        assert_eq!(v["geo"]["@type"], "GeoCoordinates");
        assert_eq!(v["areaServed"]["@type"], "City");
        assert_eq!(v["openingHoursSpecification"]["dayOfWeek"].as_array().unwrap().len(), 7);
        assert_eq!(v["sameAs"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn service_catalog_has_one_offer_per_service() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let b = business_by_slug(&store, "brenda-devlin-real-estate");
        let docs = for_page(&ctx, &Page::Business(b));
        let v = json_of(&docs[2]);
        let offers = v["hasOfferCatalog"]["itemListElement"].as_array().unwrap();
        assert_eq!(offers.len(), b.services.len());
        for (offer, service) in offers.iter().zip(&b.services) {
            assert_eq!(offer["@type"], "Offer");
            assert_eq!(offer["itemOffered"]["name"], service.as_str());
        }
        assert_eq!(v["provider"]["@type"], "RealEstateAgent");
    }

    #[test]
    fn absent_fields_are_omitted_not_null() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let b = business_by_slug(&store, "desert-luxury-homes");
        let docs = for_page(&ctx, &Page::Business(b));
        assert_eq!(docs[0].type_name(), "LocalBusiness");

        let text = docs[0].to_json();
        assert!(!text.contains("null"));
        let v = json_of(&docs[0]);
        for key in ["geo", "email", "image", "url", "hasMap", "priceRange", "sameAs"] {
            assert!(v.get(key).is_none(), "{key} should be omitted");
        }
    }

    #[test]
    fn blog_post_facets() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let post = post_by_slug(&store, "coachella-valley-market-report-2025");
        let docs = for_page(&ctx, &Page::BlogPost(post));
        let v = json_of(&docs[0]);

        assert_eq!(v["@type"], "BlogPosting");
        assert_eq!(v["headline"], post.title.as_str());
        assert_eq!(v["articleSection"], "Market Report");
        assert_eq!(v["datePublished"], "2025-09-15");
        assert_eq!(v["dateModified"], "2025-10-01");
        assert_eq!(v["author"]["@type"], "Person");
        assert_eq!(v["author"]["jobTitle"], "Real Estate Agent");
        assert_eq!(v["publisher"]["@type"], "Organization");
        assert_eq!(
            v["mainEntityOfPage"]["@id"],
            "https://brendadevlin.com/blog/coachella-valley-market-report-2025"
        );
        assert_eq!(v["inLanguage"], "en-US");
    }

    #[test]
    fn blog_index_lists_every_post() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let docs = for_page(&ctx, &Page::BlogIndex);
        match &docs[0].node {
            Node::Blog(blog) => {
                assert_eq!(blog.blog_post.len(), store.posts.len());
                assert_eq!(blog.url, "https://brendadevlin.com/blog");
            }
            other => panic!("expected Blog, got {other:?}"),
        }
    }

    #[test]
    fn faq_page_has_one_question_per_entry() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let docs = for_page(&ctx, &Page::Faq);
        let v = json_of(&docs[0]);
        assert_eq!(v["@type"], "FAQPage");
        let questions = v["mainEntity"].as_array().unwrap();
        assert_eq!(questions.len(), store.faq.len());
        assert_eq!(questions[0]["@type"], "Question");
        assert_eq!(questions[0]["acceptedAnswer"]["@type"], "Answer");
        assert_eq!(questions[0]["name"], store.faq[0].question.as_str());
    }

    #[test]
    fn faq_without_entries_emits_only_breadcrumbs() {
        let config = fixture_config();
        let mut store = fixture_store();
        store.faq.clear();
        let ctx = fixture_context(&config, &store);
        let types: Vec<&str> = for_page(&ctx, &Page::Faq)
            .iter()
            .map(JsonLd::type_name)
            .collect();
        assert_eq!(types, vec!["BreadcrumbList"]);
    }

    #[test]
    fn about_page_person() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let docs = for_page(&ctx, &Page::About);
        let v = json_of(&docs[0]);
        assert_eq!(v["@type"], "Person");
        assert_eq!(v["name"], "Brenda Devlin");
        assert_eq!(v["url"], "https://brendadevlin.com/about");
        assert_eq!(v["memberOf"]["@type"], "Organization");
        assert_eq!(v["knowsAbout"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn home_page_business_and_website() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let types: Vec<&str> = for_page(&ctx, &Page::Home)
            .iter()
            .map(JsonLd::type_name)
            .collect();
        assert_eq!(types, vec!["RealEstateAgent", "WebSite"]);
    }

    #[test]
    fn breadcrumb_positions_are_contiguous_and_end_at_page() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        for route in Route::enumerate(&store) {
            let page = resolve(&store, &route).unwrap();
            let crumbs = for_page(&ctx, &page).into_iter().find_map(|d| match d.node {
                Node::BreadcrumbList(list) => Some(list),
                _ => None,
            });
            let Some(list) = crumbs else {
                assert_eq!(route, Route::Home);
                continue;
            };
            let positions: Vec<u32> =
                list.item_list_element.iter().map(|i| i.position).collect();
            let expected: Vec<u32> = (1..=positions.len() as u32).collect();
            assert_eq!(positions, expected, "route {route:?}");
            let last = list.item_list_element.last().unwrap();
            assert_eq!(last.item, ctx.url(&route.path()));
        }
    }

    #[test]
    fn breadcrumb_urls_are_distinct_live_pages() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        for route in Route::enumerate(&store) {
            let page = resolve(&store, &route).unwrap();
            for doc in for_page(&ctx, &page) {
                let Node::BreadcrumbList(list) = doc.node else {
                    continue;
                };
                let mut seen = std::collections::HashSet::new();
                for crumb in &list.item_list_element {
                    assert!(seen.insert(crumb.item.clone()), "{route:?} repeats {}", crumb.item);
                    let path = crumb.item.strip_prefix(&config.site.base_url).unwrap();
                    let target = Route::parse(path);
                    assert!(resolve(&store, &target).is_ok(), "{route:?} links {path}");
                }
            }
        }
    }

    #[test]
    fn business_breadcrumb_is_home_then_name() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        let b = business_by_slug(&store, "desert-luxury-homes");
        let list = for_page(&ctx, &Page::Business(b))
            .into_iter()
            .find_map(|d| match d.node {
                Node::BreadcrumbList(list) => Some(list),
                _ => None,
            })
            .unwrap();
        let names: Vec<&str> = list.item_list_element.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Desert Luxury Homes"]);
    }

    #[test]
    fn round_trip_preserves_every_object() {
        let (config, store) = (fixture_config(), fixture_store());
        let ctx = fixture_context(&config, &store);
        for route in Route::enumerate(&store) {
            let page = resolve(&store, &route).unwrap();
            for doc in for_page(&ctx, &page) {
                let parsed: JsonLd = serde_json::from_str(&doc.to_json()).unwrap();
                assert_eq!(parsed, doc, "route {route:?}");
            }
        }
    }

    #[test]
    fn script_body_escapes_closing_tags() {
        let doc = JsonLd::new(Node::FaqPage(faq_page(&[FaqEntry {
            question: "</script><script>alert(1)</script>".to_string(),
            answer: "ok".to_string(),
        }])));
        let body = doc.to_script_body();
        assert!(!body.contains("</script>"));
        let parsed: JsonLd = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn opening_hours_ranges_and_lists() {
        let hours = parse_opening_hours("Mo-Su 00:00-23:59").unwrap();
        assert_eq!(hours.day_of_week.len(), 7);
        assert_eq!(hours.opens, "00:00");
        assert_eq!(hours.closes, "23:59");

        let hours = parse_opening_hours("Mo,We,Fr-Sa 09:00-17:00").unwrap();
        assert_eq!(
            hours.day_of_week,
            vec!["Monday", "Wednesday", "Friday", "Saturday"]
        );
    }

    #[test]
    fn opening_hours_rejects_free_text() {
        assert!(parse_opening_hours("Available 24/7").is_none());
        assert!(parse_opening_hours("Su-Mo 09:00-17:00").is_none());
        assert!(parse_opening_hours("Mo 9am-5pm").is_none());
    }
}
