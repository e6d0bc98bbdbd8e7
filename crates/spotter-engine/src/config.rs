//! Configuration for ranking operations
//!
//! Bounds repository concurrency and sets request defaults.

use crate::{taxonomy, EngineError};
use serde::{Deserialize, Serialize};
use spotter_domain::Taxonomy;
use std::path::PathBuf;

/// Largest nearby range a request may ask for
pub const MAX_NEARBY_RANGE: usize = 50;

/// Configuration for the ranking service
///
/// # Examples
///
/// ```
/// use spotter_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_concurrent_queries, 3);
/// assert_eq!(config.default_nearby_range, 5);
///
/// let config = EngineConfig::from_toml("max_concurrent_queries = 8").unwrap();
/// assert_eq!(config.max_concurrent_queries, 8);
/// assert_eq!(config.default_nearby_range, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Repository queries allowed in flight at once
    /// Default: 3
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,

    /// Athletes listed on each side in the nearby window
    /// Default: 5
    #[serde(default = "default_nearby_range")]
    pub default_nearby_range: usize,

    /// Taxonomy file replacing the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_path: Option<PathBuf>,
}

fn default_max_concurrent_queries() -> usize {
    3
}

fn default_nearby_range() -> usize {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_queries: default_max_concurrent_queries(),
            default_nearby_range: default_nearby_range(),
            taxonomy_path: None,
        }
    }
}

impl EngineConfig {
    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| EngineError::Config(format!("Invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_concurrent_queries == 0 {
            return Err(EngineError::Config(
                "max_concurrent_queries must be at least 1".to_string(),
            ));
        }
        if self.default_nearby_range > MAX_NEARBY_RANGE {
            return Err(EngineError::Config(format!(
                "default_nearby_range must be at most {}",
                MAX_NEARBY_RANGE
            )));
        }
        Ok(())
    }

    /// Taxonomy from `taxonomy_path`, or the built-in table
    pub fn load_taxonomy(&self) -> Result<Taxonomy, EngineError> {
        match &self.taxonomy_path {
            Some(path) => taxonomy::load(path),
            None => taxonomy::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_concurrent_queries, 3);
        assert_eq!(config.default_nearby_range, 5);
        assert!(config.taxonomy_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_permits() {
        let config = EngineConfig {
            max_concurrent_queries: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_from_toml_validates() {
        assert!(EngineConfig::from_toml("default_nearby_range = 500").is_err());
        assert!(EngineConfig::from_toml("max_concurrent_queries = \"many\"").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig {
            max_concurrent_queries: 6,
            default_nearby_range: 3,
            taxonomy_path: Some(PathBuf::from("/etc/spotter/taxonomy.toml")),
        };
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_taxonomy_override_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.toml");
        std::fs::write(&path, "fully_tested = [\"XYZ\"]\n").unwrap();

        let config = EngineConfig {
            taxonomy_path: Some(path),
            ..EngineConfig::default()
        };
        let taxonomy = config.load_taxonomy().unwrap();
        assert_eq!(taxonomy.fully_tested_federations(), vec!["xyz".to_string()]);
        assert!(taxonomy.countries.is_empty());
    }

    #[test]
    fn test_missing_taxonomy_file() {
        let config = EngineConfig {
            taxonomy_path: Some(PathBuf::from("/nonexistent/taxonomy.toml")),
            ..EngineConfig::default()
        };
        assert!(matches!(config.load_taxonomy(), Err(EngineError::Config(_))));
    }
}
