//! Similarity configuration
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration. Values are checked by [`SimilarityConfig::validate`] on load.

use crate::graph::{EntityKind, RelationshipType};
use crate::similarity::DEFAULT_PERSON_KEYS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Set-overlap settings for one entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapSettings {
    /// Kind of neighbor whose sets are compared
    pub neighbor_kind: EntityKind,
    /// Restrict neighbors to this relationship type
    #[serde(default)]
    pub via: Option<RelationshipType>,
}

/// Engine and scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Candidate rows scored between two cancellation checks
    pub batch_size: usize,
    /// Matches returned by target-vs-all when the caller gives no count
    pub default_top_n: usize,
    /// Attribute keys compared between people
    pub person_keys: Vec<String>,
    pub organization: OverlapSettings,
    pub fund: OverlapSettings,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            default_top_n: 5,
            person_keys: DEFAULT_PERSON_KEYS.iter().map(|k| k.to_string()).collect(),
            organization: OverlapSettings {
                neighbor_kind: EntityKind::Technology,
                via: None,
            },
            fund: OverlapSettings {
                neighbor_kind: EntityKind::Organization,
                via: Some(RelationshipType::InvestsIn),
            },
        }
    }
}

impl SimilarityConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to an empty map
        let config: SimilarityConfig = if content.trim().is_empty() {
            SimilarityConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!("Loaded similarity config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".to_string()));
        }
        if self.default_top_n == 0 {
            return Err(ConfigError::Invalid("default_top_n must be at least 1".to_string()));
        }
        if self.person_keys.is_empty() {
            return Err(ConfigError::Invalid("person_keys must not be empty".to_string()));
        }
        if let Some(key) = self.person_keys.iter().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("person_keys contains a blank key: {:?}", key)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SimilarityConfig::default();
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.person_keys, vec!["university", "domain_expertise", "technical_background"]);
        assert_eq!(config.organization.neighbor_kind, EntityKind::Technology);
        assert_eq!(config.fund.via, Some(RelationshipType::InvestsIn));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(SimilarityConfig::from_yaml_str("").unwrap(), SimilarityConfig::default());
        assert_eq!(SimilarityConfig::from_yaml_str("{}").unwrap(), SimilarityConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let yaml = "batch_size: 8\nperson_keys: [university]\nfund:\n  neighbor_kind: organization\n";
        let config = SimilarityConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.person_keys, vec!["university"]);
        assert_eq!(config.fund.neighbor_kind, EntityKind::Organization);
        assert_eq!(config.fund.via, None);
    }

    #[test]
    fn test_via_relationship_parses() {
        let yaml = "organization:\n  neighbor_kind: person\n  via: WORKS_AT\n";
        let config = SimilarityConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.organization.neighbor_kind, EntityKind::Person);
        assert_eq!(config.organization.via, Some(RelationshipType::WorksAt));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            SimilarityConfig::from_yaml_str("batch_size: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimilarityConfig::from_yaml_str("default_top_n: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimilarityConfig::from_yaml_str("person_keys: []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimilarityConfig::from_yaml_str("person_keys: ['  ']"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            SimilarityConfig::from_yaml_str("batch_size: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            SimilarityConfig::from_yaml_str("organization:\n  neighbor_kind: planet\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "batch_size: 16").unwrap();
        writeln!(file, "default_top_n: 10").unwrap();
        let config = SimilarityConfig::from_path(file.path()).unwrap();
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.default_top_n, 10);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimilarityConfig::from_path(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
