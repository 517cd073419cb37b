//! Catalog rules shared by movie, actor and genre DTOs.

use crate::types::DbId;

/// Earliest release year accepted for a movie.
pub const MIN_RELEASE_YEAR: i32 = 1888;
/// Latest release year accepted for a movie.
pub const MAX_RELEASE_YEAR: i32 = 2100;
/// Longest accepted running time, in minutes.
pub const MAX_DURATION_MINS: i32 = 1000;

/// Remove duplicate ids while keeping first-seen order.
///
/// Movie actor/genre lists are stored as arrays, so duplicates would show up
/// twice when populated.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Ids from `requested` that are absent in `found`, in request order.
pub fn missing_ids(requested: &[DbId], found: &[DbId]) -> Vec<DbId> {
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect()
}

/// Public page of a movie on the client site.
pub fn movie_page_url(client_url: &str, slug: &str) -> String {
    format!("{}/movie/{slug}", client_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn missing_ids_in_request_order() {
        assert_eq!(missing_ids(&[5, 1, 9], &[1]), vec![5, 9]);
        assert!(missing_ids(&[1, 2], &[2, 1]).is_empty());
    }

    #[test]
    fn page_url_tolerates_trailing_slash() {
        assert_eq!(
            movie_page_url("https://cinema.example/", "dune"),
            "https://cinema.example/movie/dune"
        );
        assert_eq!(
            movie_page_url("http://localhost:3000", "up"),
            "http://localhost:3000/movie/up"
        );
    }
}
