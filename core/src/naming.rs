//! # Naming Utilities
//!
//! Helper functions for deriving `operationId` values from request names and
//! OpenAPI paths.

/// Reduces free text to a camelCase token made of ASCII letters and digits.
///
/// With `is_path`, `/`, `{` and `}` act as word separators so that
/// `/users/{id}` becomes `usersId`. Input that reduces to nothing yields
/// `"root"` for paths and `"default"` otherwise.
pub fn sanitize_for_operation_id(name: Option<&str>, is_path: bool) -> String {
    let fallback = if is_path { "root" } else { "default" };

    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return fallback.to_string(),
    };

    let cleaned: String = name
        .chars()
        .map(|c| {
            if is_path && matches!(c, '/' | '{' | '}') {
                ' '
            } else {
                c
            }
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let mut words = cleaned.split_whitespace();
    let first = match words.next() {
        Some(w) => w.to_lowercase(),
        None => return fallback.to_string(),
    };

    words.fold(first, |mut acc, w| {
        acc.push_str(&capitalize(w));
        acc
    })
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds `<method><Path><Name>`, e.g. `get` + `/widgets/{id}` + `Get Widget`
/// -> `getWidgetsIdGetWidget`.
///
/// Uniqueness across the document is not enforced.
pub fn operation_id(method: &str, path: &str, name: Option<&str>) -> String {
    format!(
        "{}{}{}",
        method,
        capitalize(&sanitize_for_operation_id(Some(path), true)),
        capitalize(&sanitize_for_operation_id(name, false))
    )
}
