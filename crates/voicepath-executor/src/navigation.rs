//! Pre-step navigation decisions.

use url::Url;

/// The URL with its query string and fragment removed.
///
/// Returns `None` when the input does not parse as an absolute URL.
pub fn base_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url.trim()).ok()?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed.to_string())
}

/// Whether the URL points at a site root with no path segment.
pub fn is_root_url(url: &str) -> bool {
    Url::parse(url.trim())
        .map(|parsed| matches!(parsed.path(), "" | "/"))
        .unwrap_or(false)
}

/// Decide whether the browser must load `url` before running step `index`.
///
/// - an empty URL never navigates;
/// - a URL that does not parse always navigates;
/// - the first step navigates only to a bare site root;
/// - later steps navigate when their base URL differs from the last step
///   that carried one.
pub fn needs_navigation(index: usize, url: &str, previous_url: Option<&str>) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    let Some(current) = base_url(url) else {
        return true;
    };
    if index == 0 {
        return is_root_url(url);
    }
    match previous_url.and_then(base_url) {
        Some(previous) => previous != current,
        None => true,
    }
}
