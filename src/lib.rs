//! # pseo
//!
//! Programmatic SEO page generation. A template declares a title and a
//! description with `{variable}` tokens plus a list of values per variable;
//! pseo expands every combination into a page descriptor with a slug,
//! canonical URL, keywords and optional schema.org JSON-LD, then checks the
//! batch before it gets published.
//!
//! # Architecture: Four-Step Pipeline
//!
//! ```text
//! 1. Register  pseo.toml       →  TemplateRegistry      (named templates)
//! 2. Expand    template        →  combinations          (capped Cartesian product)
//! 3. Generate  combinations    →  PageDescriptor batch  (slug, canonical, keywords, JSON-LD)
//! 4. Validate  batch           →  errors + warnings     (publish gate)
//! ```
//!
//! Each step is a pure function of its input. Nothing is persisted; the
//! registry is built once from configuration and only read afterwards.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`template`] | `TemplateConfig`, `TemplateRegistry`, combination enumeration, template checks |
//! | [`interpolate`] | `{token}` substitution; unknown tokens pass through |
//! | [`slug`] | slugify, URL-pattern expansion, canonical URLs, breadcrumb titles |
//! | [`keywords`] | pluggable primary-keyword strategies and keyword lists |
//! | [`page`] | `PageGenerator`: batch and single-page generation |
//! | [`schema`] | schema.org JSON-LD builders and checks |
//! | [`validate`] | batch validation of generated pages |
//! | [`head`] | HTML `<head>` metadata rendering |
//! | [`config`] | `pseo.toml` loading, merging and validation |
//! | [`types`] | shared serializable types (`Combination`, `PageDescriptor`, ...) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Deterministic Truncation
//!
//! Enumeration walks variables depth first, first declared variable
//! outermost, and stops at the template's `max_combinations`. A capped run is
//! always a prefix of the uncapped one, so the same config generates the same
//! pages every time. When the cap binds, later values of the first variables
//! are the ones left out.
//!
//! ## Unique Template Names
//!
//! Registering a name twice is an error rather than a silent overwrite.
//! Replacing a template is a separate, explicit call.
//!
//! ## Errors vs. Findings
//!
//! Lookups that miss return `None`. Template and page checks never fail;
//! they return findings the caller must inspect. Only I/O and config parsing
//! produce `Err`.

pub mod config;
pub mod head;
pub mod interpolate;
pub mod keywords;
pub mod output;
pub mod page;
pub mod schema;
pub mod slug;
pub mod template;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
