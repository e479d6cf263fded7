//! Template registry and combination enumeration.
//!
//! A template is a title and a description containing `{variable}` tokens,
//! plus an ordered list of allowed values for each variable:
//!
//! ```toml
//! [[templates]]
//! name = "device-transfer"
//! title = "Send Files from {device1} to {device2}"
//! description = "Move photos and documents from {device1} to {device2} directly."
//! max_combinations = 50
//!
//! [templates.variables]
//! device1 = ["iPhone", "Android"]
//! device2 = ["Windows PC", "Mac"]
//! ```
//!
//! ## Enumeration Order
//!
//! Combinations are the Cartesian product of the value lists, walked depth
//! first with the first declared variable outermost:
//!
//! ```text
//! {device1: iPhone,  device2: Windows PC}
//! {device1: iPhone,  device2: Mac}
//! {device1: Android, device2: Windows PC}
//! {device1: Android, device2: Mac}
//! ```
//!
//! The walk stops as soon as `max_combinations` results exist, so a capped
//! result is always a prefix of the uncapped one. The cap is checked during
//! the walk; the full product is never materialized.
//!
//! ## Registration
//!
//! Template names are unique. [`TemplateRegistry::register`] rejects a name
//! that is already taken; [`TemplateRegistry::replace`] is the explicit way to
//! swap a template out. Registries are plain values: build one at startup,
//! share it by reference, and construct fresh ones in tests.

use crate::interpolate::{Lookup, interpolate, tokens};
use crate::keywords::{KeywordConfig, KeywordStrategy};
use crate::types::{Combination, GeneratedCombination, RenderedText};
use crate::validate::ValidationLimits;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Cap applied to templates that don't set `max_combinations`.
pub const DEFAULT_MAX_COMBINATIONS: usize = 100;

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Template already registered: {0}")]
    Duplicate(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// A named page template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    pub name: String,
    /// Title with `{variable}` tokens.
    #[serde(rename = "title")]
    pub title_template: String,
    /// Meta description with `{variable}` tokens.
    #[serde(rename = "description")]
    pub description_template: String,
    /// Allowed values per variable, in enumeration order.
    #[serde(default)]
    pub variables: IndexMap<String, Vec<String>>,
    /// Upper bound on generated combinations. Falls back to the registry default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_combinations: Option<usize>,
    /// Default URL pattern used when a generation run doesn't supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
    /// How the primary keyword is derived for each page.
    #[serde(default)]
    pub keywords: KeywordConfig,
}

impl TemplateConfig {
    /// Size of the full Cartesian product, saturating at `u64::MAX`.
    pub fn total_combinations(&self) -> u64 {
        self.variables
            .values()
            .fold(1u64, |acc, values| acc.saturating_mul(values.len() as u64))
    }

    /// Combination assigning each variable its first value.
    ///
    /// Variables without values are left out.
    pub fn sample_combination(&self) -> Combination {
        self.variables
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.clone(), v.clone())))
            .collect()
    }

    pub fn render<L: Lookup + ?Sized>(&self, variables: &L) -> RenderedText {
        RenderedText {
            title: interpolate(&self.title_template, variables),
            description: interpolate(&self.description_template, variables),
        }
    }
}

/// Result of [`validate_template`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Per-template numbers reported by [`TemplateRegistry::template_stats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStats {
    /// Size of the uncapped product.
    pub total_combinations: u64,
    /// How many combinations generation will actually produce.
    pub generated_combinations: usize,
    pub variable_count: usize,
    pub variables: Vec<VariableStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableStats {
    pub name: String,
    pub value_count: usize,
}

/// Named templates plus optional per-template keyword strategies.
pub struct TemplateRegistry {
    templates: IndexMap<String, TemplateConfig>,
    strategies: HashMap<String, Arc<dyn KeywordStrategy>>,
    default_max_combinations: usize,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("custom_strategies", &self.strategies.keys().collect::<Vec<_>>())
            .field("default_max_combinations", &self.default_max_combinations)
            .finish()
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::with_default_cap(DEFAULT_MAX_COMBINATIONS)
    }

    /// Registry whose templates without `max_combinations` use `cap`.
    pub fn with_default_cap(cap: usize) -> Self {
        Self {
            templates: IndexMap::new(),
            strategies: HashMap::new(),
            default_max_combinations: cap,
        }
    }

    /// Register a template under its name. Fails if the name is taken.
    ///
    /// No content validation happens here; see [`validate_template`].
    pub fn register(&mut self, template: TemplateConfig) -> Result<(), RegistryError> {
        if self.templates.contains_key(&template.name) {
            return Err(RegistryError::Duplicate(template.name));
        }
        tracing::debug!(
            template = %template.name,
            variables = template.variables.len(),
            "registered template"
        );
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Insert or overwrite a template, returning the one it replaced.
    ///
    /// A custom keyword strategy attached to the old template is dropped.
    pub fn replace(&mut self, template: TemplateConfig) -> Option<TemplateConfig> {
        self.strategies.remove(&template.name);
        tracing::debug!(template = %template.name, "replaced template");
        self.templates.insert(template.name.clone(), template)
    }

    /// Attach a custom keyword strategy to a registered template.
    ///
    /// Takes precedence over the template's configured [`KeywordConfig`].
    pub fn set_strategy(
        &mut self,
        name: &str,
        strategy: Arc<dyn KeywordStrategy>,
    ) -> Result<(), RegistryError> {
        if !self.templates.contains_key(name) {
            return Err(RegistryError::UnknownTemplate(name.to_string()));
        }
        self.strategies.insert(name.to_string(), strategy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.get(name)
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Keyword strategy in effect for a template.
    pub fn strategy(&self, name: &str) -> Option<&dyn KeywordStrategy> {
        match self.strategies.get(name) {
            Some(custom) => Some(custom.as_ref()),
            None => self
                .templates
                .get(name)
                .map(|t| &t.keywords as &dyn KeywordStrategy),
        }
    }

    /// Effective combination cap for a template.
    pub fn cap_for(&self, template: &TemplateConfig) -> usize {
        template
            .max_combinations
            .unwrap_or(self.default_max_combinations)
    }

    /// Enumerate variable combinations for a template, capped.
    ///
    /// Unknown templates yield an empty list.
    pub fn generate_combinations(&self, name: &str) -> Vec<GeneratedCombination> {
        let Some(template) = self.get(name) else {
            tracing::debug!(template = %name, "no such template");
            return Vec::new();
        };
        let cap = self.cap_for(template);
        let total = template.total_combinations();
        if total > cap as u64 {
            tracing::warn!(
                template = %name,
                total,
                cap,
                "combination cap truncates enumeration"
            );
        }

        enumerate(template, cap)
            .into_iter()
            .map(|variables| {
                let rendered = template.render(&variables);
                GeneratedCombination {
                    variables,
                    title: rendered.title,
                    description: rendered.description,
                }
            })
            .collect()
    }

    /// Render a template's title and description for explicit variables.
    ///
    /// Returns `None` only when the template doesn't exist; tokens the
    /// variables don't cover are left in place.
    pub fn process_template<L: Lookup + ?Sized>(
        &self,
        name: &str,
        variables: &L,
    ) -> Option<RenderedText> {
        self.get(name).map(|t| t.render(variables))
    }

    pub fn template_stats(&self, name: &str) -> Option<TemplateStats> {
        let template = self.get(name)?;
        let total = template.total_combinations();
        let cap = self.cap_for(template);
        Some(TemplateStats {
            total_combinations: total,
            generated_combinations: total.min(cap as u64) as usize,
            variable_count: template.variables.len(),
            variables: template
                .variables
                .iter()
                .map(|(name, values)| VariableStats {
                    name: name.clone(),
                    value_count: values.len(),
                })
                .collect(),
        })
    }

    /// [`validate_template`] for a registered template, using this
    /// registry's default cap for the exhaustive length check.
    pub fn validate(&self, name: &str, limits: &ValidationLimits) -> Option<TemplateValidation> {
        let template = self.get(name)?;
        Some(check_template(template, limits, self.cap_for(template)))
    }
}

/// Depth-first walk over the value lists, stopping at `cap` results.
fn enumerate(template: &TemplateConfig, cap: usize) -> Vec<Combination> {
    let variables: Vec<(&String, &Vec<String>)> = template.variables.iter().collect();
    let mut out = Vec::new();
    let mut current = Combination::with_capacity(variables.len());
    walk(&variables, 0, &mut current, cap, &mut out);
    out
}

fn walk(
    variables: &[(&String, &Vec<String>)],
    depth: usize,
    current: &mut Combination,
    cap: usize,
    out: &mut Vec<Combination>,
) {
    if out.len() >= cap {
        return;
    }
    let Some((name, values)) = variables.get(depth) else {
        out.push(current.clone());
        return;
    };
    for value in values.iter() {
        if out.len() >= cap {
            break;
        }
        current.insert((*name).clone(), value.clone());
        walk(variables, depth + 1, current, cap, out);
    }
    current.shift_remove(name.as_str());
}

/// Check a template for configuration mistakes.
///
/// Errors reported:
/// - a `{token}` in the title or description with no variable definition
/// - a variable that neither string references
/// - a variable with no values, or with an empty/whitespace-only value
/// - the sample rendering (first value of every variable) exceeding the
///   title or description maximum length
///
/// The sample check only looks at one combination. When the full product
/// fits within the template's cap (default [`DEFAULT_MAX_COMBINATIONS`]),
/// every combination is rendered and each over-long title or description is
/// reported as well. Beyond that size [`crate::validate::validate_pages`] on
/// the generated batch is the authoritative length check.
pub fn validate_template(template: &TemplateConfig, limits: &ValidationLimits) -> TemplateValidation {
    let cap = template.max_combinations.unwrap_or(DEFAULT_MAX_COMBINATIONS);
    check_template(template, limits, cap)
}

fn check_template(
    template: &TemplateConfig,
    limits: &ValidationLimits,
    cap: usize,
) -> TemplateValidation {
    let mut errors = Vec::new();

    let mut referenced = tokens(&template.title_template);
    for token in tokens(&template.description_template) {
        if !referenced.contains(&token) {
            referenced.push(token);
        }
    }

    for token in &referenced {
        if !template.variables.contains_key(token) {
            errors.push(format!("Variable {{{token}}} is used but not defined"));
        }
    }

    for (name, values) in &template.variables {
        if !referenced.contains(name) {
            errors.push(format!("Variable '{name}' is defined but never used"));
        }
        if values.is_empty() {
            errors.push(format!("Variable '{name}' has no values"));
        }
        if values.iter().any(|v| v.trim().is_empty()) {
            errors.push(format!("Variable '{name}' contains an empty value"));
        }
    }

    let sample = template.render(&template.sample_combination());
    let title_len = sample.title.chars().count();
    if title_len > limits.title_max {
        errors.push(format!(
            "Sample title is {title_len} characters (max {}): {}",
            limits.title_max, sample.title
        ));
    }
    let description_len = sample.description.chars().count();
    if description_len > limits.description_max {
        errors.push(format!(
            "Sample description is {description_len} characters (max {})",
            limits.description_max
        ));
    }

    let total = template.total_combinations();
    if total > 1 && total <= cap as u64 {
        for combination in enumerate(template, cap) {
            let rendered = template.render(&combination);
            if rendered.title == sample.title && rendered.description == sample.description {
                continue;
            }
            let title_len = rendered.title.chars().count();
            if title_len > limits.title_max {
                errors.push(format!(
                    "Title is {title_len} characters (max {}): {}",
                    limits.title_max, rendered.title
                ));
            }
            let description_len = rendered.description.chars().count();
            if description_len > limits.description_max {
                errors.push(format!(
                    "Description is {description_len} characters (max {}) for title: {}",
                    limits.description_max, rendered.title
                ));
            }
        }
    }

    TemplateValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
