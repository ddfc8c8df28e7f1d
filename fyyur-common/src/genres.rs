//! Genre labels shared by venues and artists
//!
//! Stored as a JSON array string. Older rows that hold a comma-delimited
//! scalar (`"Jazz, Folk"`) or an array literal (`{Jazz,Folk}`) still decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels offered by the venue and artist forms
pub const GENRE_CHOICES: &[&str] = &[
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

/// Ordered sequence of distinct, trimmed, non-empty genre labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Normalize labels: trim, drop empties, keep first occurrence of duplicates
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || out.iter().any(|g| g == label) {
                continue;
            }
            out.push(label.to_string());
        }
        Genres(out)
    }

    /// Encode for storage
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode a stored value, accepting the JSON array form or a comma-delimited scalar
    pub fn decode(stored: &str) -> Self {
        let stored = stored.trim();
        if stored.is_empty() {
            return Genres::default();
        }
        if stored.starts_with('[') {
            if let Ok(labels) = serde_json::from_str::<Vec<String>>(stored) {
                return Genres::new(labels);
            }
        }
        let stored = stored
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(stored);
        Genres::new(stored.split(',').map(|s| s.trim().trim_matches('"')))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl fmt::Display for Genres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_deduplicates_in_order() {
        let g = Genres::new(["  Jazz", "Folk", "", "Jazz ", "Blues"]);
        assert_eq!(g.as_slice(), &["Jazz", "Folk", "Blues"]);
    }

    #[test]
    fn test_encode_is_json_array() {
        let g = Genres::new(["Jazz", "R&B"]);
        assert_eq!(g.encode(), r#"["Jazz","R&B"]"#);
        assert_eq!(Genres::default().encode(), "[]");
    }

    #[test]
    fn test_decode_json() {
        let g = Genres::decode(r#"["Rock n Roll", "Soul"]"#);
        assert_eq!(g.as_slice(), &["Rock n Roll", "Soul"]);
    }

    #[test]
    fn test_decode_legacy_comma_form() {
        let g = Genres::decode("Jazz, Reggae,Swing,");
        assert_eq!(g.as_slice(), &["Jazz", "Reggae", "Swing"]);
    }

    #[test]
    fn test_decode_array_literal_form() {
        let g = Genres::decode(r#"{Jazz,"Hip-Hop",Folk}"#);
        assert_eq!(g.as_slice(), &["Jazz", "Hip-Hop", "Folk"]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(Genres::decode("").is_empty());
        assert!(Genres::decode("[]").is_empty());
    }

    #[test]
    fn test_display_joins_with_comma() {
        assert_eq!(Genres::new(["Jazz", "Folk"]).to_string(), "Jazz, Folk");
    }
}
