use serde::{Deserialize, Serialize};
use std::fmt;

/// A person name split into first token / remainder.
///
/// The catalog delivers cast members as one display string; locally actors
/// are stored as first + last name. The split keeps everything after the
/// first space in the last name ("Robert Downey Jr." -> "Robert" /
/// "Downey Jr."). Single-token names get an empty last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn parse(full_name: &str) -> Self {
        let trimmed = full_name.trim();
        match trimmed.split_once(' ') {
            Some((first, rest)) => Self::new(first, rest),
            None => Self::new(trimmed, ""),
        }
    }

    /// Case-insensitive comparison against another first/last pair.
    pub fn matches_ci(&self, first: &str, last: &str) -> bool {
        self.first.to_lowercase() == first.to_lowercase()
            && self.last.to_lowercase() == last.to_lowercase()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.last.is_empty() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{} {}", self.first, self.last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_space_only() {
        let name = PersonName::parse("Robert Downey Jr.");
        assert_eq!(name.first, "Robert");
        assert_eq!(name.last, "Downey Jr.");
    }

    #[test]
    fn single_token_gets_empty_last_name() {
        let name = PersonName::parse("Cher");
        assert_eq!(name.first, "Cher");
        assert_eq!(name.last, "");
        assert_eq!(name.to_string(), "Cher");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = PersonName::parse("  Tom Hanks ");
        assert_eq!(name.first, "Tom");
        assert_eq!(name.last, "Hanks");
    }

    #[test]
    fn matches_case_insensitively() {
        let name = PersonName::parse("Tom Hanks");
        assert!(name.matches_ci("tom", "HANKS"));
        assert!(!name.matches_ci("tom", "cruise"));
    }
}
