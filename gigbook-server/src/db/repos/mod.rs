//! Repository implementations for database access
//!
//! Each repository borrows the request's `Session` and follows these patterns:
//! - point lookups return `Option`, deletes return `bool` (a miss is not an error)
//! - list operations use JOINs or grouped counts (no N+1)
//! - writes rely on DB constraints instead of check-then-insert

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::ArtistRepo;
pub use shows::ShowRepo;
pub use venues::VenueRepo;

/// `ILIKE` pattern matching `term` literally anywhere in the value.
///
/// `%`, `_` and the escape character itself are escaped so user input can't
/// act as a wildcard. An empty term yields `%%`, which matches every row.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_term_in_wildcards() {
        assert_eq!(contains_pattern("Hop"), "%Hop%");
    }

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("100%_"), r"%100\%\_%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
