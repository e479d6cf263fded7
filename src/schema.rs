//! schema.org JSON-LD builders.
//!
//! Each builder takes a partial data struct and returns a complete object with
//! `@context` and `@type` set and site-level defaults filled in from
//! [`SiteInfo`]. Optional fields the caller leaves out and that have no
//! default are omitted, never emitted as `null`, so every object survives a
//! JSON round trip unchanged.
//!
//! ```text
//! SchemaBuilder::new(&site, "https://example.com")
//!     .web_page(&WebPageData { name: Some("Send Files".into()), ..Default::default() })
//! → {"@context": "https://schema.org", "@type": "WebPage", "name": "Send Files", ...}
//! ```
//!
//! ## Checks
//!
//! [`validate_structured_data`] is deliberately shallow: an object with
//! `@context` and `@type` passes. [`check_structured_data`] adds per-type
//! findings, where missing essentials (an `Article` without `headline`) are
//! errors and missing recommended fields (an `Article` without `author`) are
//! warnings.

use crate::slug::humanize_segment;
use crate::types::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Site identity used as the default publisher/author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Profile URLs (social accounts, repositories).
    pub same_as: Vec<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "File Transfer".to_string(),
            logo: None,
            description: None,
            same_as: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationData {
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub same_as: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct WebPageData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleData {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    /// ISO 8601 date. Defaults to today (UTC).
    pub date_published: Option<String>,
    /// Defaults to `date_published`.
    pub date_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbItem {
    pub name: String,
    /// Absent for the current page.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default)]
pub struct SoftwareApplicationData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub application_category: Option<String>,
    pub operating_system: Option<String>,
    pub price: Option<String>,
    pub price_currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HowToStep {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct HowToData {
    pub name: Option<String>,
    pub description: Option<String>,
    /// ISO 8601 duration, e.g. `PT2M`.
    pub total_time: Option<String>,
    pub steps: Vec<HowToStep>,
}

/// Builds JSON-LD objects with defaults from one site.
#[derive(Debug, Clone)]
pub struct SchemaBuilder<'a> {
    site: &'a SiteInfo,
    base_url: &'a str,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(site: &'a SiteInfo, base_url: &'a str) -> Self {
        Self {
            site,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    pub fn organization(&self, data: &OrganizationData) -> Value {
        let mut obj = typed("Organization");
        obj.insert("name".into(), json!(pick(&data.name, &self.site.name)));
        obj.insert("url".into(), json!(pick(&data.url, self.base_url)));
        put(&mut obj, "logo", data.logo.as_ref().or(self.site.logo.as_ref()));
        put(
            &mut obj,
            "description",
            data.description.as_ref().or(self.site.description.as_ref()),
        );
        let same_as = data.same_as.as_ref().unwrap_or(&self.site.same_as);
        if !same_as.is_empty() {
            obj.insert("sameAs".into(), json!(same_as));
        }
        Value::Object(obj)
    }

    pub fn web_page(&self, data: &WebPageData) -> Value {
        let mut obj = typed("WebPage");
        obj.insert("name".into(), json!(pick(&data.name, &self.site.name)));
        put(
            &mut obj,
            "description",
            data.description.as_ref().or(self.site.description.as_ref()),
        );
        obj.insert("url".into(), json!(pick(&data.url, self.base_url)));
        obj.insert(
            "isPartOf".into(),
            json!({
                "@type": "WebSite",
                "name": self.site.name,
                "url": self.base_url,
            }),
        );
        obj.insert("publisher".into(), self.publisher());
        Value::Object(obj)
    }

    pub fn article(&self, data: &ArticleData) -> Value {
        let published = data
            .date_published
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());
        let modified = data.date_modified.clone().unwrap_or_else(|| published.clone());

        let mut obj = typed("Article");
        obj.insert("headline".into(), json!(pick(&data.headline, &self.site.name)));
        put(&mut obj, "description", data.description.as_ref());
        put(&mut obj, "image", data.image.as_ref().or(self.site.logo.as_ref()));
        obj.insert(
            "author".into(),
            match &data.author {
                Some(name) => json!({ "@type": "Person", "name": name }),
                None => json!({ "@type": "Organization", "name": self.site.name }),
            },
        );
        obj.insert("publisher".into(), self.publisher());
        obj.insert("datePublished".into(), json!(published));
        obj.insert("dateModified".into(), json!(modified));
        obj.insert(
            "mainEntityOfPage".into(),
            json!({
                "@type": "WebPage",
                "@id": pick(&data.url, self.base_url),
            }),
        );
        Value::Object(obj)
    }

    pub fn breadcrumb_list(&self, items: &[BreadcrumbItem]) -> Value {
        let elements: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut element = typed_bare("ListItem");
                element.insert("position".into(), json!(i + 1));
                element.insert("name".into(), json!(item.name));
                put(&mut element, "item", item.url.as_ref());
                Value::Object(element)
            })
            .collect();

        let mut obj = typed("BreadcrumbList");
        obj.insert("itemListElement".into(), Value::Array(elements));
        Value::Object(obj)
    }

    /// Breadcrumb trail for a slug: `Home`, then one item per path segment.
    ///
    /// The last item is the current page and carries no URL.
    pub fn breadcrumbs_for_slug(&self, slug: &str) -> Vec<BreadcrumbItem> {
        let mut items = vec![BreadcrumbItem {
            name: "Home".to_string(),
            url: Some(format!("{}/", self.base_url)),
        }];
        let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();
        for (i, segment) in segments.iter().enumerate() {
            items.push(BreadcrumbItem {
                name: humanize_segment(segment),
                url: Some(format!("{}/{}", self.base_url, segments[..=i].join("/"))),
            });
        }
        if let Some(current) = items.last_mut() {
            current.url = None;
        }
        items
    }

    pub fn faq_page(&self, entries: &[FaqEntry]) -> Value {
        let questions: Vec<Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "@type": "Question",
                    "name": entry.question,
                    "acceptedAnswer": { "@type": "Answer", "text": entry.answer },
                })
            })
            .collect();

        let mut obj = typed("FAQPage");
        obj.insert("mainEntity".into(), Value::Array(questions));
        Value::Object(obj)
    }

    pub fn software_application(&self, data: &SoftwareApplicationData) -> Value {
        let mut obj = typed("SoftwareApplication");
        obj.insert("name".into(), json!(pick(&data.name, &self.site.name)));
        put(
            &mut obj,
            "description",
            data.description.as_ref().or(self.site.description.as_ref()),
        );
        obj.insert("url".into(), json!(pick(&data.url, self.base_url)));
        obj.insert(
            "applicationCategory".into(),
            json!(pick(&data.application_category, "UtilitiesApplication")),
        );
        obj.insert(
            "operatingSystem".into(),
            json!(pick(&data.operating_system, "Web")),
        );
        obj.insert(
            "offers".into(),
            json!({
                "@type": "Offer",
                "price": pick(&data.price, "0"),
                "priceCurrency": pick(&data.price_currency, "USD"),
            }),
        );
        Value::Object(obj)
    }

    pub fn how_to(&self, data: &HowToData) -> Value {
        let steps: Vec<Value> = data
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                json!({
                    "@type": "HowToStep",
                    "position": i + 1,
                    "name": step.name,
                    "text": step.text,
                })
            })
            .collect();

        let mut obj = typed("HowTo");
        obj.insert("name".into(), json!(pick(&data.name, &self.site.name)));
        put(&mut obj, "description", data.description.as_ref());
        put(&mut obj, "totalTime", data.total_time.as_ref());
        obj.insert("step".into(), Value::Array(steps));
        Value::Object(obj)
    }

    fn publisher(&self) -> Value {
        let mut publisher = typed_bare("Organization");
        publisher.insert("name".into(), json!(self.site.name));
        if let Some(logo) = &self.site.logo {
            publisher.insert(
                "logo".into(),
                json!({ "@type": "ImageObject", "url": logo }),
            );
        }
        Value::Object(publisher)
    }
}

fn typed(schema_type: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("@context".into(), json!(SCHEMA_CONTEXT));
    obj.insert("@type".into(), json!(schema_type));
    obj
}

fn typed_bare(schema_type: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("@type".into(), json!(schema_type));
    obj
}

fn pick<'v>(value: &'v Option<String>, default: &'v str) -> &'v str {
    value.as_deref().unwrap_or(default)
}

fn put(obj: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), json!(v));
    }
}

// =============================================================================
// Checks
// =============================================================================

/// Shallow structural check: an object carrying `@context` and `@type`.
pub fn validate_structured_data(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    present(obj, "@context") && present(obj, "@type")
}

/// Structural check plus per-type required (error) and recommended
/// (warning) fields.
pub fn check_structured_data(value: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(obj) = value.as_object() else {
        return ValidationResult::from_findings(
            vec!["Structured data must be a JSON object".to_string()],
            warnings,
        );
    };
    if !present(obj, "@context") {
        errors.push("Missing @context".to_string());
    } else if obj.get("@context") != Some(&json!(SCHEMA_CONTEXT)) {
        warnings.push(format!("@context is not {SCHEMA_CONTEXT}"));
    }
    if !present(obj, "@type") {
        errors.push("Missing @type".to_string());
    }

    let schema_type = obj.get("@type").and_then(Value::as_str).unwrap_or_default();
    let (required, recommended): (&[&str], &[&str]) = match schema_type {
        "Organization" => (&["name"], &["url", "logo"]),
        "WebPage" => (&["name"], &["url", "description"]),
        "Article" => (&["headline"], &["author", "datePublished", "image"]),
        "BreadcrumbList" => (&["itemListElement"], &[]),
        "FAQPage" => (&["mainEntity"], &[]),
        "HowTo" => (&["name", "step"], &["description"]),
        "SoftwareApplication" => (&["name"], &["offers", "operatingSystem"]),
        _ => (&[], &[]),
    };
    for field in required {
        if !present(obj, field) {
            errors.push(format!("{schema_type} is missing required field {field}"));
        }
    }
    for field in recommended {
        if !present(obj, field) {
            warnings.push(format!("{schema_type} is missing recommended field {field}"));
        }
    }

    ValidationResult::from_findings(errors, warnings)
}

/// Present, not null, and not an empty string or array.
fn present(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}
