//! Federation taxonomy - static lookup tables the cohort filter depends on
//!
//! The tables themselves are data owned outside the domain; this module only
//! defines their shape and lookups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Country federation groups and the fully-tested federation set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Country slug ("usa", "uk") to the federation codes historically
    /// associated with it
    #[serde(default)]
    pub countries: BTreeMap<String, Vec<String>>,

    /// Federations known to drug test every competitor
    #[serde(default)]
    pub fully_tested: Vec<String>,
}

impl Taxonomy {
    /// Federation codes of a country group, lowercased
    pub fn country_federations(&self, slug: &str) -> Option<Vec<String>> {
        self.countries
            .get(&slug.trim().to_lowercase())
            .map(|codes| lowercase_all(codes))
    }

    /// Fully-tested federation codes, lowercased
    pub fn fully_tested_federations(&self) -> Vec<String> {
        lowercase_all(&self.fully_tested)
    }

    /// Whether a country slug is known
    pub fn has_country(&self, slug: &str) -> bool {
        self.countries.contains_key(&slug.trim().to_lowercase())
    }
}

fn lowercase_all(codes: &[String]) -> Vec<String> {
    codes.iter().map(|c| c.trim().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_are_case_insensitive() {
        let mut taxonomy = Taxonomy::default();
        taxonomy
            .countries
            .insert("usa".to_string(), vec!["USAPL".to_string(), "USPA".to_string()]);
        taxonomy.fully_tested = vec!["IPF".to_string()];

        assert_eq!(
            taxonomy.country_federations("USA"),
            Some(vec!["usapl".to_string(), "uspa".to_string()])
        );
        assert!(taxonomy.country_federations("narnia").is_none());
        assert_eq!(taxonomy.fully_tested_federations(), vec!["ipf".to_string()]);
    }
}
