//! Selector rewriting and fallback extraction.
//!
//! Recorded selectors come from a jQuery-flavoured capture script, so some of
//! them use pseudo-classes the browser engine does not understand. These
//! helpers translate them and mine the selector list for link targets when
//! every selector fails.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CONTAINS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#":contains\(\s*(?:'([^']*)'|"([^"]*)"|([^)]*?))\s*\)"#).expect("valid regex")
});

static HREF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href\*?=\s*['"]([^'"]+)['"]"#).expect("valid regex"));

static ABSOLUTE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s'"\)\]]+"#).expect("valid regex"));

/// Rewrite `:contains(x)` into the engine-native `:has-text("x")`.
///
/// Selectors without the pseudo-class are returned unchanged.
pub fn to_native_selector(selector: &str) -> String {
    CONTAINS_PATTERN
        .replace_all(selector, |caps: &Captures<'_>| {
            let text = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());
            format!(":has-text(\"{}\")", escape_quotes(text))
        })
        .into_owned()
}

/// Link targets mentioned by `href=` or `href*=` attribute selectors, in order
/// of first appearance.
pub fn extract_hrefs(selectors: &[String]) -> Vec<String> {
    let mut hrefs: Vec<String> = Vec::new();
    for selector in selectors {
        for caps in HREF_PATTERN.captures_iter(selector) {
            let href = caps[1].trim().to_string();
            if !href.is_empty() && !hrefs.contains(&href) {
                hrefs.push(href);
            }
        }
    }
    hrefs
}

/// Absolute `http(s)` URLs appearing anywhere in the selectors.
pub fn extract_absolute_urls(selectors: &[String]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for selector in selectors {
        for m in ABSOLUTE_URL_PATTERN.find_iter(selector) {
            let url = m.as_str().to_string();
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

/// Exact anchor selector for a link target.
pub fn href_selector(href: &str) -> String {
    format!("a[href=\"{}\"]", escape_quotes(href))
}

fn escape_quotes(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
