//! Built-in federation taxonomy and file overrides

use crate::EngineError;
use spotter_domain::Taxonomy;
use std::path::Path;

const BUILTIN: &str = include_str!("taxonomy.toml");

/// Taxonomy shipped with the engine
pub fn builtin() -> Result<Taxonomy, EngineError> {
    parse(BUILTIN)
}

/// Parse a taxonomy from TOML text
pub fn parse(text: &str) -> Result<Taxonomy, EngineError> {
    toml::from_str(text).map_err(|e| EngineError::Config(format!("Invalid taxonomy: {}", e)))
}

/// Read a taxonomy file
pub fn load(path: &Path) -> Result<Taxonomy, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        EngineError::Config(format!("Cannot read taxonomy {}: {}", path.display(), e))
    })?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let taxonomy = builtin().unwrap();
        assert!(taxonomy.has_country("usa"));
        assert!(taxonomy
            .country_federations("usa")
            .unwrap()
            .contains(&"usapl".to_string()));
        assert!(taxonomy.fully_tested_federations().contains(&"ipf".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(parse("countries = 3").is_err());
        assert_eq!(parse("").unwrap(), Taxonomy::default());
    }
}
