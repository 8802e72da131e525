//! Input sanitization and step validation.
//!
//! Everything captured from a page is untrusted. Text is stripped of script
//! content and inline handlers and bounded in length; steps whose URL or
//! attribute set is out of bounds are rejected outright.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use voicepath_protocols::RecordedStep;

use crate::config::RecorderConfig;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "file", "about"];

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?script\b[^>]*>").expect("valid regex"));
static JAVASCRIPT_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"));
static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bon[a-z]+\s*=").expect("valid regex"));

/// Strip script blocks, `javascript:` URIs and inline event handlers, trim,
/// and truncate to `max_chars` characters.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let cleaned = SCRIPT_BLOCK.replace_all(input, "");
    let cleaned = SCRIPT_TAG.replace_all(&cleaned, "");
    let cleaned = JAVASCRIPT_URI.replace_all(&cleaned, "");
    let cleaned = EVENT_HANDLER.replace_all(&cleaned, "");
    truncate(cleaned.trim(), max_chars)
}

/// First `max_chars` characters of `input`.
pub fn truncate(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((end, _)) => input[..end].to_string(),
        None => input.to_string(),
    }
}

/// Whether `url` parses and uses an allowed scheme.
pub fn is_allowed_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| ALLOWED_SCHEMES.contains(&parsed.scheme()))
        .unwrap_or(false)
}

/// Validate a captured step and return its sanitized form.
///
/// Rejected: blank action, disallowed or over-long URL, too many attributes.
/// Text, value and selectors are cleaned and truncated instead.
pub fn validate_step(mut step: RecordedStep, limits: &RecorderConfig) -> Result<RecordedStep, String> {
    step.action = step.action.trim().to_string();
    if step.action.is_empty() {
        return Err("missing action".to_string());
    }
    if step.url.len() > limits.max_url_length {
        return Err(format!(
            "url exceeds {} characters",
            limits.max_url_length
        ));
    }
    if !is_allowed_url(&step.url) {
        return Err(format!("url '{}' is not an allowed http(s)/file/about URL", step.url));
    }
    if step.attributes.len() > limits.max_attributes {
        return Err(format!(
            "{} attributes exceed the limit of {}",
            step.attributes.len(),
            limits.max_attributes
        ));
    }

    step.text = step
        .text
        .map(|text| sanitize_text(&text, limits.max_text_length))
        .filter(|text| !text.is_empty());
    // typed values keep their whitespace; only length is bounded
    step.value = step
        .value
        .map(|value| truncate(&value, limits.max_text_length));
    step.selectors = step
        .selectors
        .into_iter()
        .map(|selector| truncate(selector.trim(), limits.max_selector_length))
        .filter(|selector| !selector.is_empty())
        .take(limits.max_selectors)
        .collect();
    for value in step.attributes.values_mut() {
        if let serde_json::Value::String(text) = value {
            *text = sanitize_text(text, limits.max_text_length);
        }
    }

    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_strips_scripts_and_handlers() {
        assert_eq!(
            sanitize_text("예약 <script>alert('x')</script>하기", 100),
            "예약 하기"
        );
        assert_eq!(sanitize_text("<img src=x onerror=steal()>", 100), "<img src=x steal()>");
        assert_eq!(sanitize_text("javascript:void(0)", 100), "void(0)");
        assert_eq!(sanitize_text("<SCRIPT>", 100), "");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("가나다라", 2), "가나");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_allowed_schemes() {
        assert!(is_allowed_url("https://a.com"));
        assert!(is_allowed_url("file:///tmp/form.html"));
        assert!(is_allowed_url("about:blank"));
        assert!(!is_allowed_url("javascript:alert(1)"));
        assert!(!is_allowed_url("chrome://settings"));
        assert!(!is_allowed_url(""));
    }

    #[test]
    fn test_validate_cleans_fields() {
        let limits = RecorderConfig {
            max_selectors: 2,
            max_text_length: 5,
            ..Default::default()
        };
        let step = RecordedStep::new("  click ", "https://a.com/")
            .with_selector("#a")
            .with_selector("  ")
            .with_selector("#b")
            .with_selector("#c")
            .with_text("<script>x</script>Submit form")
            .with_attribute("title", json!("hello onclick=run()"));

        let step = validate_step(step, &limits).unwrap();
        assert_eq!(step.action, "click");
        assert_eq!(step.selectors, vec!["#a", "#b"]);
        assert_eq!(step.text.as_deref(), Some("Submi"));
        assert_eq!(step.attributes["title"], json!("hello"));
    }

    #[test]
    fn test_validate_rejects() {
        let limits = RecorderConfig {
            max_attributes: 1,
            max_url_length: 30,
            ..Default::default()
        };
        assert!(validate_step(RecordedStep::new("click", "javascript:alert(1)"), &limits).is_err());
        assert!(validate_step(RecordedStep::new(" ", "https://a.com"), &limits).is_err());
        assert!(
            validate_step(
                RecordedStep::new("click", format!("https://a.com/{}", "x".repeat(40))),
                &limits
            )
            .is_err()
        );
        let crowded = RecordedStep::new("click", "https://a.com")
            .with_attribute("a", json!(1))
            .with_attribute("b", json!(2));
        assert!(validate_step(crowded, &limits).is_err());
    }
}
