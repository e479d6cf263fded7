//! HTML `<head>` metadata for a generated page.
//!
//! Renders the SEO-relevant part of a document head: title, meta description
//! and keywords, canonical link, Open Graph basics, and one
//! `<script type="application/ld+json">` per structured-data object.
//!
//! Markup is built with [maud](https://maud.lambda.xyz/), so every text value
//! is escaped. JSON-LD is the one pre-escaped block; `</` inside it is
//! rewritten to `<\/` so a value can't close the script element early.

use crate::types::PageDescriptor;
use maud::{Markup, PreEscaped, html};

/// `<head>` children for one page.
pub fn render_head(page: &PageDescriptor) -> Markup {
    html! {
        title { (page.title) }
        meta name="description" content=(page.description);
        @if !page.keywords.is_empty() {
            meta name="keywords" content=(page.keywords.join(", "));
        }
        link rel="canonical" href=(page.canonical);
        meta property="og:type" content="website";
        meta property="og:title" content=(page.title);
        meta property="og:description" content=(page.description);
        meta property="og:url" content=(page.canonical);
        @for object in &page.structured_data {
            script type="application/ld+json" { (PreEscaped(json_for_script(object))) }
        }
    }
}

/// Serialize JSON for embedding inside a `<script>` element.
fn json_for_script(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}
