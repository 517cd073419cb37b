//! Search-term handling for the `?search_term=` list filters.
//!
//! List endpoints match case-insensitively on substrings. The user's term is
//! treated literally: `ILIKE` wildcards inside it are escaped.

/// Normalize an optional query term: trims whitespace, and treats an empty
/// term the same as no term at all.
pub fn normalize_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

/// Build an `ILIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and the escape character `\` are escaped so they match
/// themselves (Postgres' default `ILIKE` escape is backslash).
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Convenience: normalized term turned into a pattern, if any.
pub fn search_pattern(term: Option<&str>) -> Option<String> {
    normalize_term(term).map(contains_pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_terms_are_ignored() {
        assert_eq!(normalize_term(None), None);
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(Some(" nolan ")), Some("nolan"));
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("dune"), "%dune%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn search_pattern_combines_both() {
        assert_eq!(search_pattern(Some(" Matrix ")).as_deref(), Some("%Matrix%"));
        assert_eq!(search_pattern(Some("")), None);
    }
}
