//! Shared query parameter types for API handlers.

use cinema_core::search::search_pattern;
use serde::Deserialize;

/// `?search_term=` filter accepted by the list endpoints.
///
/// `searchTerm` is accepted as well for clients of the older API.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default, alias = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchParams {
    /// The `ILIKE` pattern for this term, or `None` when no filtering applies.
    pub fn pattern(&self) -> Option<String> {
        search_pattern(self.search_term.as_deref())
    }
}
