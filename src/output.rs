//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every generated page leads with its positional index and title. The slug,
//! canonical URL and keywords follow as indented context lines, so the output
//! reads as a content inventory:
//!
//! ```text
//! 001 Send Files from iPhone to Windows PC
//!     Slug: send-file-from-iphone-to-windows-pc
//!     Canonical: https://example.com/send-file-from-iphone-to-windows-pc
//!     Keywords: send file from iphone to windows pc, iPhone file transfer, ...
//!
//! Generated 9 pages
//! ```
//!
//! ## Validation
//!
//! ```text
//! Errors (1)
//!     Duplicate slug: static
//! Warnings (2)
//!     Page a: title too short (5 < 10)
//!     ...
//! Result: invalid
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::page::GenerationReport;
use crate::template::{TemplateStats, TemplateValidation};
use crate::types::{PageDescriptor, ValidationResult};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// `"1 page"` / `"3 pages"`
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Pages
// ============================================================================

pub fn format_pages_output(pages: &[PageDescriptor]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.title));
        lines.push(format!("    Slug: {}", page.slug));
        lines.push(format!("    Canonical: {}", page.canonical));
        lines.push(format!("    Description: {}", truncate(&page.description, 60)));
        if !page.keywords.is_empty() {
            lines.push(format!(
                "    Keywords: {}",
                truncate(&page.keywords.join(", "), 80)
            ));
        }
        if !page.structured_data.is_empty() {
            let types: Vec<&str> = page
                .structured_data
                .iter()
                .filter_map(|v| v.get("@type").and_then(|t| t.as_str()))
                .collect();
            lines.push(format!("    Structured data: {}", types.join(", ")));
        }
    }
    if !pages.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Generated {}", plural(pages.len(), "page")));
    lines
}

pub fn print_pages_output(pages: &[PageDescriptor]) {
    for line in format_pages_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Validation
// ============================================================================

pub fn format_validation_output(result: &ValidationResult) -> Vec<String> {
    let mut lines = Vec::new();
    if !result.errors.is_empty() {
        lines.push(format!("Errors ({})", result.errors.len()));
        lines.extend(result.errors.iter().map(|e| format!("    {e}")));
    }
    if !result.warnings.is_empty() {
        lines.push(format!("Warnings ({})", result.warnings.len()));
        lines.extend(result.warnings.iter().map(|w| format!("    {w}")));
    }
    lines.push(format!(
        "Result: {}",
        if result.is_valid { "valid" } else { "invalid" }
    ));
    lines
}

pub fn print_validation_output(result: &ValidationResult) {
    for line in format_validation_output(result) {
        println!("{}", line);
    }
}

/// Warning line for combinations a generation run left out, if any.
pub fn skipped_warning(report: &GenerationReport) -> Option<String> {
    if report.skipped.is_empty() {
        return None;
    }
    let tokens: Vec<String> = report
        .missing_tokens
        .iter()
        .map(|t| format!("{{{t}}}"))
        .collect();
    Some(format!(
        "Skipped {}: URL pattern has unresolved {}",
        plural(report.skipped.len(), "combination"),
        tokens.join(", ")
    ))
}

// ============================================================================
// Templates
// ============================================================================

pub fn format_stats_output(name: &str, stats: &TemplateStats) -> Vec<String> {
    let mut lines = vec![name.to_string()];
    lines.push(format!(
        "    Combinations: {} of {} possible",
        stats.generated_combinations, stats.total_combinations
    ));
    lines.push(format!("    Variables: {}", stats.variable_count));
    for variable in &stats.variables {
        lines.push(format!(
            "        {} ({})",
            variable.name,
            plural(variable.value_count, "value")
        ));
    }
    lines
}

pub fn print_stats_output(name: &str, stats: &TemplateStats) {
    for line in format_stats_output(name, stats) {
        println!("{}", line);
    }
}

/// One block per template: `ok`, or the list of configuration errors.
pub fn format_template_check(index: usize, name: &str, result: &TemplateValidation) -> Vec<String> {
    if result.is_valid {
        return vec![format!("{} {}: ok", format_index(index), name)];
    }
    let mut lines = vec![format!(
        "{} {}: {}",
        format_index(index),
        name,
        plural(result.errors.len(), "error")
    )];
    lines.extend(result.errors.iter().map(|e| format!("    {e}")));
    lines
}

pub fn print_template_check(index: usize, name: &str, result: &TemplateValidation) {
    for line in format_template_check(index, name, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
