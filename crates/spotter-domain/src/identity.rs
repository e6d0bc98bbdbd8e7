//! Athlete identity - how result rows are grouped into athletes
//!
//! Identity is the literal name string. The same person recorded under
//! differently formatted names in the two record sets counts as two athletes,
//! which undercounts cohorts. Resolution lives behind [`IdentityStrategy`] so
//! it can be improved without touching ranking.

use std::borrow::Cow;

/// Maps an athlete name to the key results are grouped by
pub trait IdentityStrategy: Send + Sync {
    /// Grouping key for a name
    fn key<'a>(&self, name: &'a str) -> Cow<'a, str>;

    /// Whether two names refer to the same athlete
    fn same_athlete(&self, a: &str, b: &str) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Exact string equality, no normalization at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactName;

impl IdentityStrategy for ExactName {
    fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_is_literal() {
        let identity = ExactName;
        assert!(identity.same_athlete("Jane Doe", "Jane Doe"));
        assert!(!identity.same_athlete("Jane Doe", "jane doe"));
        assert!(!identity.same_athlete("Jane Doe", "Jane Doe #1"));
    }
}
