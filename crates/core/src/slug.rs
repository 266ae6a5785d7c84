/// Derive a URL-safe slug from a display name.
///
/// Lowercases, replaces each run of whitespace with `-`, then drops every
/// character outside `[a-z0-9-]`.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn spaces_become_dashes() {
        assert_eq!(slugify("Code Review"), "code-review");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(slugify("a \t  b"), "a-b");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("C++ & Rust!"), "c--rust");
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(slugify("  SQL  "), "sql");
    }
}
