//! Batch validation of generated pages before publication.
//!
//! Findings are split in two:
//!
//! | Kind | Checks | Effect |
//! |------|--------|--------|
//! | error | duplicate slug, missing title/description/canonical, canonical not `http(s)://` | `is_valid = false` |
//! | warning | duplicate title, title or description outside length bounds, no keywords | reported only |
//!
//! Lengths are counted in characters. The check is pure: the input batch is
//! only read.

use crate::types::{PageDescriptor, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Length bounds for titles and descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationLimits {
    pub title_min: usize,
    pub title_max: usize,
    pub description_min: usize,
    pub description_max: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            title_min: 10,
            title_max: 60,
            description_min: 50,
            description_max: 160,
        }
    }
}

/// Check a batch of pages with the default limits.
pub fn validate_pages(pages: &[PageDescriptor]) -> ValidationResult {
    validate_pages_with(pages, &ValidationLimits::default())
}

pub fn validate_pages_with(pages: &[PageDescriptor], limits: &ValidationLimits) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for slug in duplicates(pages.iter().map(|p| p.slug.as_str())) {
        errors.push(format!("Duplicate slug: {slug}"));
    }
    for title in duplicates(pages.iter().map(|p| p.title.as_str())) {
        warnings.push(format!("Duplicate title: {title}"));
    }

    for page in pages {
        let label = if page.slug.is_empty() { "(root)" } else { &page.slug };

        if page.title.trim().is_empty() {
            errors.push(format!("Page {label}: missing title"));
        }
        if page.description.trim().is_empty() {
            errors.push(format!("Page {label}: missing description"));
        }
        if page.canonical.trim().is_empty() {
            errors.push(format!("Page {label}: missing canonical URL"));
        } else if !is_http_url(&page.canonical) {
            errors.push(format!(
                "Page {label}: canonical URL must start with http:// or https://: {}",
                page.canonical
            ));
        }

        let title_len = page.title.chars().count();
        if title_len > limits.title_max {
            warnings.push(format!(
                "Page {label}: title too long ({title_len} > {})",
                limits.title_max
            ));
        } else if title_len < limits.title_min && title_len > 0 {
            warnings.push(format!(
                "Page {label}: title too short ({title_len} < {})",
                limits.title_min
            ));
        }

        let description_len = page.description.chars().count();
        if description_len > limits.description_max {
            warnings.push(format!(
                "Page {label}: description too long ({description_len} > {})",
                limits.description_max
            ));
        } else if description_len < limits.description_min && description_len > 0 {
            warnings.push(format!(
                "Page {label}: description too short ({description_len} < {})",
                limits.description_min
            ));
        }

        if page.keywords.is_empty() {
            warnings.push(format!("Page {label}: no keywords"));
        }
    }

    ValidationResult::from_findings(errors, warnings)
}

/// `^https?://`
pub(crate) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Values occurring more than once, each reported once, in first-seen order.
fn duplicates<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(value);
        }
    }
    order
}
