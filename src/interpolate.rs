//! `{token}` substitution for template strings.
//!
//! A token is a brace-delimited word (`\w+`), e.g. `{device1}`. Substitution
//! is a single left-to-right pass over non-overlapping matches, so the order
//! in which variables are supplied never changes the result, and replaced
//! values are never rescanned for further tokens.
//!
//! Tokens with no matching variable are left verbatim: `interpolate` never
//! fails and never blanks an unknown token. Callers that need every token
//! resolved check [`unresolved_tokens`] afterwards.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("token pattern is valid"));

/// Anything that can answer "what is the value of `key`?".
///
/// Implemented for the map types used across the crate so callers can pass
/// a [`crate::types::Combination`] or a plain `HashMap` interchangeably.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl Lookup for indexmap::IndexMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Lookup for std::collections::HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Lookup for std::collections::BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Lookup for [(&str, &str)] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Replace every `{key}` in `template` with `variables[key]`.
pub fn interpolate<L: Lookup + ?Sized>(template: &str, variables: &L) -> String {
    interpolate_with(template, variables, |value| Cow::Borrowed(value))
}

/// Like [`interpolate`], but passes every substituted value through
/// `transform` first. Used by URL-pattern expansion to slugify values.
pub fn interpolate_with<L, F>(template: &str, variables: &L, transform: F) -> String
where
    L: Lookup + ?Sized,
    F: for<'v> Fn(&'v str) -> Cow<'v, str>,
{
    TOKEN
        .replace_all(template, |caps: &Captures| match variables.lookup(&caps[1]) {
            Some(value) => transform(value).into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Token names in `template`, in first-appearance order, without duplicates.
pub fn tokens(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Tokens in `template` that `variables` cannot resolve.
pub fn unresolved_tokens<L: Lookup + ?Sized>(template: &str, variables: &L) -> Vec<String> {
    tokens(template)
        .into_iter()
        .filter(|name| variables.lookup(name).is_none())
        .collect()
}
