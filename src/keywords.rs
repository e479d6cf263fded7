//! Keyword derivation for generated pages.
//!
//! Each template picks a [`KeywordStrategy`] that turns a variable combination
//! into a primary keyword. The secondary keyword list is built the same way for
//! every strategy by [`keyword_list`]: primary first, then one
//! `"{value} file transfer"` and one `"send files {value}"` per value, then the
//! site's generic terms, de-duplicated with empties dropped.

use crate::interpolate::interpolate;
use crate::types::Combination;
use serde::{Deserialize, Serialize};

/// Derives the primary keyword for one combination.
pub trait KeywordStrategy: Send + Sync {
    fn primary_keyword(&self, variables: &Combination) -> String;
}

impl<F> KeywordStrategy for F
where
    F: Fn(&Combination) -> String + Send + Sync,
{
    fn primary_keyword(&self, variables: &Combination) -> String {
        self(variables)
    }
}

/// Strategy selectable from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum KeywordConfig {
    /// `"send file from {first} to {second}"` for two or more values,
    /// `"file transfer {first}"` for one.
    #[default]
    DeviceTransfer,
    /// Interpolate `primary` with the combination, then lowercase.
    Pattern { primary: String },
}

impl KeywordStrategy for KeywordConfig {
    fn primary_keyword(&self, variables: &Combination) -> String {
        match self {
            KeywordConfig::DeviceTransfer => device_transfer_keyword(variables),
            KeywordConfig::Pattern { primary } => {
                interpolate(primary, variables).trim().to_lowercase()
            }
        }
    }
}

fn device_transfer_keyword(variables: &Combination) -> String {
    let mut values = variables.values().map(|v| v.trim());
    match (values.next(), values.next()) {
        (Some(from), Some(to)) => format!("send file from {from} to {to}").to_lowercase(),
        (Some(only), None) => format!("file transfer {only}").to_lowercase().trim().to_string(),
        _ => FALLBACK_KEYWORD.to_string(),
    }
}

const FALLBACK_KEYWORD: &str = "file transfer";

/// Run `strategy` and normalize its output into a usable primary keyword.
///
/// The result is trimmed. A blank result falls back to the device-transfer
/// keyword for the same variables, so it is never empty and always equals
/// the first entry of [`keyword_list`].
pub fn resolve_primary_keyword(strategy: &dyn KeywordStrategy, variables: &Combination) -> String {
    let keyword = strategy.primary_keyword(variables).trim().to_string();
    if !keyword.is_empty() {
        return keyword;
    }
    tracing::debug!(?variables, "blank primary keyword, using device-transfer fallback");
    let fallback = device_transfer_keyword(variables).trim().to_string();
    if fallback.is_empty() {
        FALLBACK_KEYWORD.to_string()
    } else {
        fallback
    }
}

/// Full keyword list for a page.
///
/// The trimmed `primary` is the first element whenever it is non-empty.
/// Pass the output of [`resolve_primary_keyword`] to get that guarantee.
pub fn keyword_list(primary: &str, variables: &Combination, generic: &[String]) -> Vec<String> {
    let candidates = std::iter::once(primary.to_string())
        .chain(variables.values().map(|v| format!("{v} file transfer")))
        .chain(variables.values().map(|v| format!("send files {v}")))
        .chain(generic.iter().cloned());

    let mut keywords: Vec<String> = Vec::new();
    for keyword in candidates {
        let keyword = keyword.trim().to_string();
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(pairs: &[(&str, &str)]) -> Combination {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn device_transfer_two_values() {
        let v = combo(&[("device1", "iPhone"), ("device2", "Windows PC")]);
        assert_eq!(
            KeywordConfig::DeviceTransfer.primary_keyword(&v),
            "send file from iphone to windows pc"
        );
    }

    #[test]
    fn device_transfer_uses_first_two_of_three() {
        let v = combo(&[("a", "Mac"), ("b", "Linux"), ("c", "Android")]);
        assert_eq!(
            KeywordConfig::DeviceTransfer.primary_keyword(&v),
            "send file from mac to linux"
        );
    }

    #[test]
    fn device_transfer_single_value() {
        let v = combo(&[("topic", "Large Videos ")]);
        assert_eq!(
            KeywordConfig::DeviceTransfer.primary_keyword(&v),
            "file transfer large videos"
        );
    }

    #[test]
    fn device_transfer_no_values() {
        assert_eq!(
            KeywordConfig::DeviceTransfer.primary_keyword(&combo(&[])),
            "file transfer"
        );
    }

    #[test]
    fn pattern_strategy_interpolates() {
        let strategy = KeywordConfig::Pattern {
            primary: "How To Share {kind} Files".to_string(),
        };
        let v = combo(&[("kind", "RAW")]);
        assert_eq!(strategy.primary_keyword(&v), "how to share raw files");
    }

    #[test]
    fn closures_are_strategies() {
        let strategy = |v: &Combination| format!("{} guide", v.len());
        let v = combo(&[("a", "x")]);
        assert_eq!(strategy.primary_keyword(&v), "1 guide");
    }

    #[test]
    fn keyword_config_parses_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            keywords: KeywordConfig,
        }
        let w: Wrapper =
            toml::from_str(r#"keywords = { strategy = "pattern", primary = "{a} x" }"#).unwrap();
        assert_eq!(
            w.keywords,
            KeywordConfig::Pattern {
                primary: "{a} x".to_string()
            }
        );
        let w: Wrapper = toml::from_str(r#"keywords = { strategy = "device-transfer" }"#).unwrap();
        assert_eq!(w.keywords, KeywordConfig::DeviceTransfer);
    }

    #[test]
    fn device_transfer_trims_padded_values() {
        let v = combo(&[("device1", " iPhone"), ("device2", "Mac ")]);
        assert_eq!(
            KeywordConfig::DeviceTransfer.primary_keyword(&v),
            "send file from iphone to mac"
        );
    }

    #[test]
    fn resolved_primary_is_trimmed() {
        let strategy = |_: &Combination| "  Share Files  ".to_string();
        let v = combo(&[("a", "Mac")]);
        assert_eq!(resolve_primary_keyword(&strategy, &v), "Share Files");
    }

    #[test]
    fn blank_primary_falls_back_to_device_transfer() {
        let blank = KeywordConfig::Pattern {
            primary: " ".to_string(),
        };
        let v = combo(&[("device1", "iPhone"), ("device2", "Mac")]);
        assert_eq!(
            resolve_primary_keyword(&blank, &v),
            "send file from iphone to mac"
        );
        assert_eq!(resolve_primary_keyword(&blank, &combo(&[])), "file transfer");
    }

    #[test]
    fn resolved_primary_leads_keyword_list() {
        let strategy = |_: &Combination| "\t".to_string();
        for v in [
            combo(&[("device1", "iPhone "), ("device2", " Mac ")]),
            combo(&[("only", "  ")]),
            combo(&[]),
        ] {
            let primary = resolve_primary_keyword(&strategy, &v);
            assert!(!primary.is_empty());
            assert_eq!(keyword_list(&primary, &v, &[])[0], primary);
        }
    }

    #[test]
    fn keyword_list_order_and_dedup() {
        let v = combo(&[("a", "Mac"), ("b", "Mac")]);
        let generic = vec!["file transfer".to_string(), "Mac file transfer".to_string()];
        let keywords = keyword_list("send file from mac to mac", &v, &generic);
        assert_eq!(
            keywords,
            vec![
                "send file from mac to mac",
                "Mac file transfer",
                "send files Mac",
                "file transfer",
            ]
        );
    }

    #[test]
    fn keyword_list_drops_empty_secondary_terms() {
        let v = combo(&[("a", "Mac")]);
        let generic = vec!["".to_string(), "  ".to_string()];
        let keywords = keyword_list("file transfer mac", &v, &generic);
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0], "file transfer mac");
    }
}
