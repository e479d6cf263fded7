//! URL slug derivation for generated pages.
//!
//! Every generated page lives at `{base_url}/{slug}`. The slug comes from the
//! template's URL pattern with each `{variable}` replaced by a slugified form
//! of its value:
//!
//! ```text
//! pattern:  send-file-from-{device1}-to-{device2}
//! values:   device1 = "iPhone 13 Pro", device2 = "Windows 11 PC"
//! slug:     send-file-from-iphone-13-pro-to-windows-11-pc
//! ```
//!
//! ## Display Titles
//!
//! Breadcrumbs need the reverse direction: a slug segment turned back into
//! something readable. Hyphens become spaces and each word gets an uppercase
//! first letter:
//! - `how-to` → "How To"
//! - `send-file-from-iphone` → "Send File From Iphone"

use crate::interpolate::{Lookup, interpolate_with};
use std::borrow::Cow;

/// Lowercase `value`, collapse every run of non-alphanumeric characters into a
/// single hyphen, and trim hyphens from both ends.
///
/// - `"iPhone 13 Pro"` → `"iphone-13-pro"`
/// - `"Mac (M2)"` → `"mac-m2"`
/// - `"  --  "` → `""`
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Expand a URL pattern into a slug.
///
/// Values are slugified before substitution. Afterwards leading and trailing
/// slashes are stripped and repeated slashes collapse to one, so patterns
/// like `/guides//{topic}/` still produce `guides/{topic-slug}`. Tokens the
/// variables can't resolve are left in place.
pub fn build_slug<L: Lookup + ?Sized>(url_pattern: &str, variables: &L) -> String {
    let expanded = interpolate_with(url_pattern, variables, |v| Cow::Owned(slugify(v)));
    normalize_slashes(&expanded)
}

/// Trim slashes at both ends and collapse interior runs of `/`.
fn normalize_slashes(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and a slug into a canonical URL.
///
/// Trailing slashes on `base_url` are ignored. The result has no trailing
/// slash unless `slug` is empty, in which case it is the site root `{base}/`.
pub fn canonical_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

/// Turn a slug segment into a display title.
///
/// - `"how-to"` → `"How To"`
/// - `"windows-11-pc"` → `"Windows 11 Pc"`
pub fn humanize_segment(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
