//! Fixed choice lists offered by the venue and artist forms

/// Genres a venue or artist may list
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state codes (plus DC)
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub fn is_genre(value: &str) -> bool {
    GENRES.contains(&value)
}

pub fn is_state(value: &str) -> bool {
    STATES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_list_is_complete() {
        assert_eq!(STATES.len(), 51);
        assert!(is_state("CA"));
        assert!(is_state("DC"));
        assert!(!is_state("ca"));
    }

    #[test]
    fn genre_lookup_is_exact() {
        assert!(is_genre("R&B"));
        assert!(!is_genre("jazz"));
    }
}
