//! Search-term helpers shared by the Postgres and in-memory stores.

/// Normalize a free-text search term: trim whitespace, treat blank as absent.
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE` substring pattern matching `term` literally.
///
/// `%`, `_` and the escape character itself are escaped with `\`, which is
/// PostgreSQL's default `LIKE` escape.
pub fn ilike_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring test with the same semantics as
/// `haystack ILIKE ilike_pattern(needle)`.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
