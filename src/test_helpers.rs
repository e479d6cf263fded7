//! Shared test fixtures for the pseo test suite.
//!
//! Provides small template builders and a known-good page descriptor so unit
//! tests across modules start from the same shapes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let registry = registry_with(ab_template(10));
//! let combos = registry.generate_combinations("t");
//! assert_eq!(combos.len(), 4);
//! ```

use crate::keywords::KeywordConfig;
use crate::template::{TemplateConfig, TemplateRegistry};
use crate::types::{Combination, PageDescriptor};
use indexmap::IndexMap;

// =========================================================================
// Templates
// =========================================================================

/// `{a}-{b}` over `a = [x, y]`, `b = [1, 2]`, named `t`.
pub fn ab_template(max_combinations: usize) -> TemplateConfig {
    TemplateConfig {
        name: "t".to_string(),
        title_template: "{a}-{b}".to_string(),
        description_template: "desc {a} {b}".to_string(),
        variables: IndexMap::from([
            ("a".to_string(), vec!["x".to_string(), "y".to_string()]),
            ("b".to_string(), vec!["1".to_string(), "2".to_string()]),
        ]),
        max_combinations: Some(max_combinations),
        url_pattern: None,
        keywords: KeywordConfig::DeviceTransfer,
    }
}

/// Template `wide` with `a0..a{n}` and `b0..b{m}` values, capped at 1000.
pub fn wide_template(n: usize, m: usize) -> TemplateConfig {
    TemplateConfig {
        name: "wide".to_string(),
        title_template: "{a} {b}".to_string(),
        description_template: "desc {a} {b}".to_string(),
        variables: IndexMap::from([
            ("a".to_string(), (0..n).map(|i| format!("a{i}")).collect()),
            ("b".to_string(), (0..m).map(|i| format!("b{i}")).collect()),
        ]),
        max_combinations: Some(1000),
        url_pattern: None,
        keywords: KeywordConfig::DeviceTransfer,
    }
}

/// Minimal valid template with the given name.
pub fn named_template(name: &str) -> TemplateConfig {
    TemplateConfig {
        name: name.to_string(),
        ..ab_template(10)
    }
}

/// Realistic device-to-device transfer template.
pub fn device_template() -> TemplateConfig {
    TemplateConfig {
        name: "device-transfer".to_string(),
        title_template: "Send Files from {device1} to {device2}".to_string(),
        description_template: "Transfer photos, videos and documents from {device1} to {device2} directly, with no upload and no size limit.".to_string(),
        variables: IndexMap::from([
            (
                "device1".to_string(),
                vec!["iPhone 13 Pro".to_string(), "Android".to_string()],
            ),
            (
                "device2".to_string(),
                vec!["Windows 11 PC".to_string(), "Mac".to_string()],
            ),
        ]),
        max_combinations: Some(50),
        url_pattern: Some("send-file-from-{device1}-to-{device2}".to_string()),
        keywords: KeywordConfig::DeviceTransfer,
    }
}

pub fn registry_with(template: TemplateConfig) -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    registry.register(template).unwrap();
    registry
}

// =========================================================================
// Pages
// =========================================================================

/// A page that passes validation with no warnings; title and slug are unique
/// per `slug`.
pub fn page(slug: &str) -> PageDescriptor {
    PageDescriptor {
        slug: slug.to_string(),
        title: format!("Send Large Files Guide {slug}"),
        description: format!(
            "Everything you need to know about sending large files for {slug}, directly and privately."
        ),
        primary_keyword: format!("send files {slug}"),
        canonical: format!("https://example.com/{slug}"),
        keywords: vec![format!("send files {slug}")],
        structured_data: Vec::new(),
        variables: Combination::new(),
    }
}
