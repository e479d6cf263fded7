//! Page descriptor generation.
//!
//! Turns template combinations into [`PageDescriptor`]s ready to publish:
//!
//! ```text
//! template "device-transfer" + pattern "send-file-from-{device1}-to-{device2}"
//!   {device1: iPhone 13 Pro, device2: Windows 11 PC}
//!     → slug       send-file-from-iphone-13-pro-to-windows-11-pc
//!     → canonical  https://example.com/send-file-from-iphone-13-pro-to-windows-11-pc
//!     → keywords   [send file from iphone 13 pro to windows 11 pc, ...]
//! ```
//!
//! ## Structured Data
//!
//! When requested, each page carries:
//! - a `WebPage` object, always
//! - an `Article` object when the slug contains `how-to`
//! - a `BreadcrumbList` built from the slug's path segments
//!
//! Generation is pure: the registry is only read and nothing is written. The
//! one exception is the `Article` publish date, which is today's date unless
//! [`PageOptions::publish_date`] pins it.

use crate::config::PseoConfig;
use crate::interpolate::unresolved_tokens;
use crate::keywords::{KeywordStrategy, keyword_list, resolve_primary_keyword};
use crate::schema::{ArticleData, SchemaBuilder, SiteInfo, WebPageData};
use crate::slug::{build_slug, canonical_url};
use crate::template::{TemplateConfig, TemplateRegistry};
use crate::types::{Combination, PageDescriptor};

pub const DEFAULT_BASE_URL: &str = "https://example.com";

/// Terms appended to every page's keyword list unless configured otherwise.
pub fn default_generic_keywords() -> Vec<String> {
    vec![
        "file transfer".to_string(),
        "send files online".to_string(),
        "peer to peer file sharing".to_string(),
    ]
}

/// Per-run overrides shared by batch and single-page generation.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Overrides the generator's base URL.
    pub base_url: Option<String>,
    pub include_structured_data: bool,
    /// ISO 8601 date for `Article` objects. Defaults to today (UTC).
    pub publish_date: Option<String>,
}

/// One batch generation request.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub template_name: String,
    pub url_pattern: String,
    pub options: PageOptions,
}

impl GenerationConfig {
    pub fn new(template_name: impl Into<String>, url_pattern: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            url_pattern: url_pattern.into(),
            options: PageOptions::default(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    pub fn with_structured_data(mut self, include: bool) -> Self {
        self.options.include_structured_data = include;
        self
    }

    pub fn published_on(mut self, date: impl Into<String>) -> Self {
        self.options.publish_date = Some(date.into());
        self
    }
}

/// Pages from one batch run, plus the combinations left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub pages: Vec<PageDescriptor>,
    /// Combinations whose URL pattern kept unresolved tokens.
    pub skipped: Vec<Combination>,
    /// Token names the URL pattern could not resolve, in first-seen order.
    pub missing_tokens: Vec<String>,
}

/// Builds page descriptors from a registry's templates.
#[derive(Debug)]
pub struct PageGenerator<'r> {
    registry: &'r TemplateRegistry,
    base_url: String,
    site: SiteInfo,
    generic_keywords: Vec<String>,
}

impl<'r> PageGenerator<'r> {
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        Self {
            registry,
            base_url: DEFAULT_BASE_URL.to_string(),
            site: SiteInfo::default(),
            generic_keywords: default_generic_keywords(),
        }
    }

    /// Generator using the config file's base URL, site info and keywords.
    pub fn from_config(registry: &'r TemplateRegistry, config: &PseoConfig) -> Self {
        Self {
            registry,
            base_url: config.base_url.clone(),
            site: config.site.clone(),
            generic_keywords: config.generation.generic_keywords.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_site(mut self, site: SiteInfo) -> Self {
        self.site = site;
        self
    }

    pub fn with_generic_keywords(mut self, keywords: Vec<String>) -> Self {
        self.generic_keywords = keywords;
        self
    }

    /// One page per combination of the template, in enumeration order.
    ///
    /// Unknown templates produce no pages. Combinations whose URL pattern
    /// still has unresolved tokens after substitution are skipped, since the
    /// resulting slug would contain literal `{token}` text. Use
    /// [`PageGenerator::generate_report`] to see what was skipped.
    pub fn generate_pages(&self, config: &GenerationConfig) -> Vec<PageDescriptor> {
        self.generate_report(config).pages
    }

    /// [`PageGenerator::generate_pages`], also returning skipped combinations.
    pub fn generate_report(&self, config: &GenerationConfig) -> GenerationReport {
        let mut report = GenerationReport::default();
        let Some(template) = self.registry.get(&config.template_name) else {
            tracing::warn!(template = %config.template_name, "no such template");
            return report;
        };
        let Some(strategy) = self.registry.strategy(&config.template_name) else {
            return report;
        };

        for combination in self.registry.generate_combinations(&config.template_name) {
            let missing = unresolved_tokens(&config.url_pattern, &combination.variables);
            if !missing.is_empty() {
                tracing::warn!(
                    template = %config.template_name,
                    pattern = %config.url_pattern,
                    ?missing,
                    "skipping page with unresolved URL tokens"
                );
                for token in missing {
                    if !report.missing_tokens.contains(&token) {
                        report.missing_tokens.push(token);
                    }
                }
                report.skipped.push(combination.variables);
                continue;
            }
            report.pages.push(self.build_page(
                template,
                strategy,
                combination.variables,
                &config.url_pattern,
                &config.options,
            ));
        }
        tracing::debug!(
            template = %config.template_name,
            pages = report.pages.len(),
            skipped = report.skipped.len(),
            "generated pages"
        );
        report
    }

    /// Page for one explicit combination.
    ///
    /// Returns `None` when the template doesn't exist, or when the title,
    /// description or URL pattern reference a token `variables` lacks.
    pub fn generate_single_page(
        &self,
        template_name: &str,
        variables: &Combination,
        url_pattern: &str,
        options: &PageOptions,
    ) -> Option<PageDescriptor> {
        let template = self.registry.get(template_name)?;
        let strategy = self.registry.strategy(template_name)?;
        let fully_resolved = [
            template.title_template.as_str(),
            template.description_template.as_str(),
            url_pattern,
        ]
        .iter()
        .all(|s| unresolved_tokens(s, variables).is_empty());
        if !fully_resolved {
            return None;
        }
        Some(self.build_page(template, strategy, variables.clone(), url_pattern, options))
    }

    fn build_page(
        &self,
        template: &TemplateConfig,
        strategy: &dyn KeywordStrategy,
        variables: Combination,
        url_pattern: &str,
        options: &PageOptions,
    ) -> PageDescriptor {
        let base_url = options.base_url.as_deref().unwrap_or(&self.base_url);
        let rendered = template.render(&variables);
        let slug = build_slug(url_pattern, &variables);
        let canonical = canonical_url(base_url, &slug);
        let primary_keyword = resolve_primary_keyword(strategy, &variables);
        let keywords = keyword_list(&primary_keyword, &variables, &self.generic_keywords);

        let structured_data = if options.include_structured_data {
            let builder = SchemaBuilder::new(&self.site, base_url);
            let mut objects = vec![builder.web_page(&WebPageData {
                name: Some(rendered.title.clone()),
                description: Some(rendered.description.clone()),
                url: Some(canonical.clone()),
            })];
            if slug.contains("how-to") {
                objects.push(builder.article(&ArticleData {
                    headline: Some(rendered.title.clone()),
                    description: Some(rendered.description.clone()),
                    url: Some(canonical.clone()),
                    date_published: options.publish_date.clone(),
                    ..Default::default()
                }));
            }
            objects.push(builder.breadcrumb_list(&builder.breadcrumbs_for_slug(&slug)));
            objects
        } else {
            Vec::new()
        };

        PageDescriptor {
            slug,
            title: rendered.title,
            description: rendered.description,
            primary_keyword,
            canonical,
            keywords,
            structured_data,
            variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordConfig;
    use crate::schema::validate_structured_data;
    use crate::test_helpers::*;
    use crate::validate::validate_pages;
    use std::sync::Arc;

    fn combo(pairs: &[(&str, &str)]) -> Combination {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn device_registry() -> TemplateRegistry {
        registry_with(device_template())
    }

    // =========================================================================
    // generate_pages
    // =========================================================================

    #[test]
    fn one_page_per_combination() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(&GenerationConfig::new(
            "device-transfer",
            "send-file-from-{device1}-to-{device2}",
        ));
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0].slug, "send-file-from-iphone-13-pro-to-windows-11-pc");
        assert_eq!(pages[3].slug, "send-file-from-android-to-mac");
    }

    #[test]
    fn canonical_and_keywords_invariants() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry).with_base_url("https://beam.example/");
        let pages = generator.generate_pages(&GenerationConfig::new(
            "device-transfer",
            "send-file-from-{device1}-to-{device2}",
        ));
        for page in &pages {
            assert_eq!(page.canonical, format!("https://beam.example/{}", page.slug));
            assert_eq!(page.keywords[0], page.primary_keyword);
        }
        assert_eq!(
            pages[0].primary_keyword,
            "send file from iphone 13 pro to windows 11 pc"
        );
        assert!(pages[0].keywords.contains(&"iPhone 13 Pro file transfer".to_string()));
        assert!(!pages[0].keywords.contains(&"send files Mac".to_string()));
        assert!(pages[0].keywords.contains(&"peer to peer file sharing".to_string()));
    }

    #[test]
    fn run_base_url_overrides_generator() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(
            &GenerationConfig::new("device-transfer", "{device1}").base_url("http://localhost:3000"),
        );
        assert_eq!(pages[0].canonical, "http://localhost:3000/iphone-13-pro");
    }

    #[test]
    fn nested_pattern_slug() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator
            .generate_pages(&GenerationConfig::new("device-transfer", "/{device1}//to/{device2}/"));
        assert_eq!(pages[0].slug, "iphone-13-pro/to/windows-11-pc");
    }

    #[test]
    fn generated_batch_validates() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(&GenerationConfig::new(
            "device-transfer",
            "send-file-from-{device1}-to-{device2}",
        ));
        let result = validate_pages(&pages);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn pattern_without_variables_produces_duplicate_slugs() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(&GenerationConfig::new("device-transfer", "static"));
        assert_eq!(pages.len(), 4);
        assert!(!validate_pages(&pages).is_valid);
    }

    #[test]
    fn unresolved_pattern_token_skips_pages() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator
            .generate_pages(&GenerationConfig::new("device-transfer", "{device1}-{missing}"));
        assert!(pages.is_empty());
    }

    #[test]
    fn unknown_template_produces_nothing() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        assert!(
            generator
                .generate_pages(&GenerationConfig::new("nope", "{a}"))
                .is_empty()
        );
    }

    #[test]
    fn structured_data_only_when_requested() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let config = GenerationConfig::new("device-transfer", "{device1}-to-{device2}");
        assert!(generator.generate_pages(&config)[0].structured_data.is_empty());

        let pages = generator.generate_pages(&config.with_structured_data(true));
        let types: Vec<&str> = pages[0]
            .structured_data
            .iter()
            .map(|v| v["@type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["WebPage", "BreadcrumbList"]);
        assert!(pages[0].structured_data.iter().all(validate_structured_data));
        assert_eq!(pages[0].structured_data[0]["url"], pages[0].canonical);
    }

    #[test]
    fn how_to_slug_adds_article() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(
            &GenerationConfig::new("device-transfer", "guides/how-to-send-{device1}")
                .with_structured_data(true),
        );
        let types: Vec<&str> = pages[0]
            .structured_data
            .iter()
            .map(|v| v["@type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["WebPage", "Article", "BreadcrumbList"]);

        let crumbs = pages[0].structured_data[2]["itemListElement"]
            .as_array()
            .unwrap();
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[1]["name"], "Guides");
        assert_eq!(crumbs[2]["name"], "How To Send Iphone 13 Pro");
        assert!(crumbs[2].get("item").is_none());
    }

    #[test]
    fn custom_strategy_drives_primary_keyword() {
        let mut registry = device_registry();
        registry
            .set_strategy(
                "device-transfer",
                Arc::new(|v: &Combination| format!("{} sharing", v["device2"].to_lowercase())),
            )
            .unwrap();
        let generator = PageGenerator::new(&registry);
        let pages = generator.generate_pages(&GenerationConfig::new(
            "device-transfer",
            "{device1}-{device2}",
        ));
        assert_eq!(pages[0].primary_keyword, "windows 11 pc sharing");
        assert_eq!(pages[0].keywords[0], "windows 11 pc sharing");
    }

    #[test]
    fn generation_is_deterministic() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let config = GenerationConfig::new("device-transfer", "{device1}-{device2}");
        assert_eq!(generator.generate_pages(&config), generator.generate_pages(&config));
    }

    #[test]
    fn padded_values_keep_primary_first() {
        let mut template = device_template();
        template.variables["device2"] = vec!["Mac ".to_string(), " Linux".to_string()];
        let registry = registry_with(template);
        let pages = PageGenerator::new(&registry)
            .generate_pages(&GenerationConfig::new("device-transfer", "{device1}-{device2}"));
        assert_eq!(pages[0].primary_keyword, "send file from iphone 13 pro to mac");
        for page in &pages {
            assert_eq!(page.keywords[0], page.primary_keyword);
        }
    }

    #[test]
    fn blank_pattern_keyword_falls_back() {
        let mut template = device_template();
        template.keywords = KeywordConfig::Pattern {
            primary: " ".to_string(),
        };
        let registry = registry_with(template);
        let pages = PageGenerator::new(&registry)
            .generate_pages(&GenerationConfig::new("device-transfer", "{device1}-{device2}"));
        assert_eq!(
            pages[0].primary_keyword,
            "send file from iphone 13 pro to windows 11 pc"
        );
        assert!(pages.iter().all(|p| p.keywords[0] == p.primary_keyword));
    }

    #[test]
    fn blank_custom_strategy_falls_back() {
        let mut registry = device_registry();
        registry
            .set_strategy("device-transfer", Arc::new(|_: &Combination| "   ".to_string()))
            .unwrap();
        let pages = PageGenerator::new(&registry)
            .generate_pages(&GenerationConfig::new("device-transfer", "{device1}-{device2}"));
        for page in &pages {
            assert!(!page.primary_keyword.is_empty());
            assert_eq!(page.keywords[0], page.primary_keyword);
        }
    }

    #[test]
    fn site_and_generic_keywords_overrides() {
        let registry = device_registry();
        let site = SiteInfo {
            name: "Beam".to_string(),
            ..SiteInfo::default()
        };
        let generator = PageGenerator::new(&registry)
            .with_site(site)
            .with_generic_keywords(vec!["beam app".to_string()]);
        let pages = generator.generate_pages(
            &GenerationConfig::new("device-transfer", "{device1}-{device2}")
                .with_structured_data(true),
        );
        assert_eq!(pages[0].keywords.last().unwrap(), "beam app");
        assert!(!pages[0].keywords.contains(&"file transfer".to_string()));
        assert_eq!(pages[0].structured_data[0]["isPartOf"]["name"], "Beam");
    }

    #[test]
    fn pinned_publish_date_makes_articles_stable() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let config = GenerationConfig::new("device-transfer", "how-to-send-{device1}")
            .with_structured_data(true)
            .published_on("2024-03-01");
        let pages = generator.generate_pages(&config);
        assert_eq!(pages[0].structured_data[1]["@type"], "Article");
        assert_eq!(pages[0].structured_data[1]["datePublished"], "2024-03-01");
        assert_eq!(pages[0].structured_data[1]["dateModified"], "2024-03-01");
        assert_eq!(pages, generator.generate_pages(&config));
    }

    #[test]
    fn report_lists_skipped_combinations() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let report = generator
            .generate_report(&GenerationConfig::new("device-transfer", "{device1}-{missing}"));
        assert!(report.pages.is_empty());
        assert_eq!(report.skipped.len(), 4);
        assert_eq!(report.missing_tokens, vec!["missing"]);

        let report = generator
            .generate_report(&GenerationConfig::new("device-transfer", "{device1}-{device2}"));
        assert_eq!(report.pages.len(), 4);
        assert!(report.skipped.is_empty());
        assert!(report.missing_tokens.is_empty());
    }

    // =========================================================================
    // generate_single_page
    // =========================================================================

    #[test]
    fn single_page_from_explicit_variables() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "iPhone 13 Pro"), ("device2", "Windows 11 PC")]);
        let page = generator
            .generate_single_page(
                "device-transfer",
                &vars,
                "send-file-from-{device1}-to-{device2}",
                &PageOptions::default(),
            )
            .unwrap();
        assert_eq!(page.slug, "send-file-from-iphone-13-pro-to-windows-11-pc");
        assert_eq!(page.title, "Send Files from iPhone 13 Pro to Windows 11 PC");
        assert_eq!(
            page.canonical,
            "https://example.com/send-file-from-iphone-13-pro-to-windows-11-pc"
        );
        assert_eq!(page.variables, vars);
    }

    #[test]
    fn single_page_accepts_values_outside_template_lists() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "Steam Deck"), ("device2", "Chromebook")]);
        let page = generator
            .generate_single_page("device-transfer", &vars, "{device1}", &PageOptions::default())
            .unwrap();
        assert_eq!(page.slug, "steam-deck");
    }

    #[test]
    fn single_page_unknown_template_is_none() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "a"), ("device2", "b")]);
        assert!(
            generator
                .generate_single_page("nope", &vars, "{device1}", &PageOptions::default())
                .is_none()
        );
    }

    #[test]
    fn single_page_missing_variable_is_none() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "a")]);
        assert!(
            generator
                .generate_single_page("device-transfer", &vars, "{device1}", &PageOptions::default())
                .is_none()
        );
    }

    #[test]
    fn single_page_unresolved_pattern_is_none() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "a"), ("device2", "b")]);
        assert!(
            generator
                .generate_single_page("device-transfer", &vars, "{other}", &PageOptions::default())
                .is_none()
        );
    }

    #[test]
    fn empty_slug_canonical_keeps_trailing_slash() {
        let registry = device_registry();
        let generator = PageGenerator::new(&registry);
        let vars = combo(&[("device1", "a"), ("device2", "b")]);
        let page = generator
            .generate_single_page("device-transfer", &vars, "/", &PageOptions::default())
            .unwrap();
        assert_eq!(page.slug, "");
        assert_eq!(page.canonical, "https://example.com/");
    }
}
