//! Division module - UI age divisions mapped to numeric age ranges
//!
//! Federations label divisions with incompatible vocabularies ("MR-Jr",
//! "Juniors 20-23", "T2"), so divisions never match on their free text.
//! Each UI division is a closed age range checked against the leading integer
//! of a result's age-class label ("40-44" -> 40).

use serde::{Deserialize, Serialize};

/// Age division offered as a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    /// 14 through 18
    SubJunior,
    /// 18 through 23
    Junior,
    /// Every age; applies no filter
    Open,
    /// 40 through 49
    Masters1,
    /// 50 through 59
    Masters2,
    /// 60 through 69
    Masters3,
    /// 70 and over
    Masters4,
}

/// Upper bound used for the open-ended oldest division
pub const MAX_AGE: u32 = 999;

impl Division {
    /// Parse a UI label or a common federation shorthand
    ///
    /// Returns `None` for "All Divisions", empty input and unrecognised labels.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match normalized.as_str() {
            "subjunior" | "subjuniors" | "sj" | "teen" | "teens" => Some(Division::SubJunior),
            "junior" | "juniors" | "jr" => Some(Division::Junior),
            "open" | "o" => Some(Division::Open),
            "masters1" | "master1" | "m1" => Some(Division::Masters1),
            "masters2" | "master2" | "m2" => Some(Division::Masters2),
            "masters3" | "master3" | "m3" => Some(Division::Masters3),
            "masters4" | "master4" | "m4" => Some(Division::Masters4),
            _ => None,
        }
    }

    /// Inclusive age range, or `None` when the division applies no filter
    pub fn age_range(&self) -> Option<(u32, u32)> {
        match self {
            Division::SubJunior => Some((14, 18)),
            Division::Junior => Some((18, 23)),
            Division::Open => None,
            Division::Masters1 => Some((40, 49)),
            Division::Masters2 => Some((50, 59)),
            Division::Masters3 => Some((60, 69)),
            Division::Masters4 => Some((70, MAX_AGE)),
        }
    }

    /// UI label
    pub fn label(&self) -> &'static str {
        match self {
            Division::SubJunior => "Sub-Junior",
            Division::Junior => "Junior",
            Division::Open => "Open",
            Division::Masters1 => "Masters 1",
            Division::Masters2 => "Masters 2",
            Division::Masters3 => "Masters 3",
            Division::Masters4 => "Masters 4",
        }
    }
}

/// Leading integer of an age-class label ("24-34" -> 24, "80-999" -> 80)
pub fn leading_age(age_class: &str) -> Option<u32> {
    let digits: String = age_class
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(Division::parse("Sub-Junior"), Some(Division::SubJunior));
        assert_eq!(Division::parse("Masters 1"), Some(Division::Masters1));
        assert_eq!(Division::parse("m4"), Some(Division::Masters4));
        assert_eq!(Division::parse("Open"), Some(Division::Open));
        assert_eq!(Division::parse("All Divisions"), None);
        assert_eq!(Division::parse(""), None);
    }

    #[test]
    fn test_open_has_no_range() {
        assert_eq!(Division::Open.age_range(), None);
        assert_eq!(Division::Masters4.age_range(), Some((70, MAX_AGE)));
    }

    #[test]
    fn test_leading_age() {
        assert_eq!(leading_age("40-44"), Some(40));
        assert_eq!(leading_age(" 5-12"), Some(5));
        assert_eq!(leading_age("80-999"), Some(80));
        assert_eq!(leading_age("Open"), None);
        assert_eq!(leading_age(""), None);
    }
}
