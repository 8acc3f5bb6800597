//! # URL Normalization
//!
//! Turns a saved request URL such as `{{ _.baseURL }}/users/:id?active=true`
//! into an OpenAPI path template (`/users/{id}`). The host lives in the
//! document's `servers` entry, so base URL templates are dropped.

use regex::Regex;
use std::sync::OnceLock;

fn base_url_re() -> &'static Regex {
    static BASE_URL_RE: OnceLock<Regex> = OnceLock::new();
    BASE_URL_RE.get_or_init(|| {
        Regex::new(r"(?i)\{\{\s*_?\s*\.?\s*(base_?url)\s*\}\}").expect("Invalid regex")
    })
}

fn template_re() -> &'static Regex {
    static TEMPLATE_RE: OnceLock<Regex> = OnceLock::new();
    TEMPLATE_RE.get_or_init(|| Regex::new(r"\{\{[^}]*\}\}").expect("Invalid regex"))
}

fn colon_param_re() -> &'static Regex {
    static COLON_PARAM_RE: OnceLock<Regex> = OnceLock::new();
    COLON_PARAM_RE.get_or_init(|| Regex::new(r":([A-Za-z0-9_]+)").expect("Invalid regex"))
}

/// Converts a raw request URL into an OpenAPI path template.
///
/// Returns an empty string when nothing path-like remains; callers skip such
/// requests.
pub fn normalize_url(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return String::new(),
    };

    let without_base = base_url_re().replace_all(raw, "");
    let without_templates = template_re().replace_all(&without_base, "");
    let without_query = match without_templates.find('?') {
        Some(idx) => &without_templates[..idx],
        None => &without_templates[..],
    };
    let templated = colon_param_re().replace_all(without_query, "{$1}");

    let path = templated.trim();
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
