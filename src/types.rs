//! Shared types passed between the registry, the page generator and the
//! validator.
//!
//! All of them serialize to JSON so the CLI can dump a generation run for
//! inspection, the same way a build manifest would be.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One value chosen for each declared template variable.
///
/// Keys keep the template's declaration order, which is also the order the
/// enumerator walks them in.
pub type Combination = IndexMap<String, String>;

/// A combination together with the title and description it renders to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCombination {
    pub variables: Combination,
    pub title: String,
    pub description: String,
}

/// Title and description rendered from a template for one set of variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedText {
    pub title: String,
    pub description: String,
}

/// Everything needed to publish one generated page.
///
/// Invariants upheld by [`crate::page::PageGenerator`]:
/// - `canonical` is `{base_url}/{slug}`, with a trailing slash only when `slug` is empty
/// - `keywords[0] == primary_keyword`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub primary_keyword: String,
    pub canonical: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structured_data: Vec<serde_json::Value>,
    pub variables: Combination,
}

/// Outcome of a batch check: hard errors block publication, warnings don't.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result whose validity is derived from `errors` being empty.
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
