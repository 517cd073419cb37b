//! Slug rules for actors, genres and movies.
//!
//! A slug is lowercase ASCII letters and digits separated by single hyphens,
//! e.g. `the-dark-knight`. Blank slugs are only ever written by the
//! "create draft" operations and are rejected on update.

use std::sync::LazyLock;

use regex::Regex;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Maximum slug length accepted on update.
pub const MAX_SLUG_LEN: usize = 128;

/// Returns `true` when `slug` is a well-formed, non-empty slug.
///
/// ```
/// use cinema_core::slug::is_valid_slug;
///
/// assert!(is_valid_slug("the-dark-knight"));
/// assert!(!is_valid_slug("The Dark Knight"));
/// ```
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LEN && SLUG_RE.is_match(slug)
}

/// `validator` custom hook for slug fields.
pub fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("slug");
        err.message = Some("must be lowercase letters and digits separated by hyphens".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_slugs() {
        assert!(is_valid_slug("drama"));
        assert!(is_valid_slug("the-dark-knight"));
        assert!(is_valid_slug("2001-a-space-odyssey"));
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Drama"));
        assert!(!is_valid_slug("-drama"));
        assert!(!is_valid_slug("drama-"));
        assert!(!is_valid_slug("sci--fi"));
        assert!(!is_valid_slug("sci fi"));
        assert!(!is_valid_slug(&"a".repeat(MAX_SLUG_LEN + 1)));
    }

    #[test]
    fn validator_hook_reports_slug_code() {
        let err = validate_slug("Sci Fi").unwrap_err();
        assert_eq!(err.code, "slug");
        assert!(validate_slug("sci-fi").is_ok());
    }
}
