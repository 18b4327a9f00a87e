//! Campaign configuration.
//!
//! One TOML document describes a campaign: the hex notation its map uses,
//! the haven list and protection radius for seasonal decay, and the
//! persistence policy parameters. Everything has a default so a missing
//! file means a fresh campaign, not an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::policy::PersistencePolicyV1;
use crate::types::{HexFormatError, HexId, Notation};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Config path.
        path: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Config path.
        path: String,
        /// Source error.
        #[source]
        source: toml::de::Error,
    },
}

fn default_haven_radius() -> u32 {
    1
}

/// Campaign configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Hex id notation the campaign map uses.
    #[serde(default)]
    pub notation: Notation,
    /// Hex ids of protected settlements.
    #[serde(default)]
    pub havens: Vec<String>,
    /// Hex distance within which an edge counts as near-haven.
    #[serde(default = "default_haven_radius")]
    pub haven_radius: u32,
    /// Seasonal persistence policy.
    #[serde(default)]
    pub policy: PersistencePolicyV1,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            notation: Notation::default(),
            havens: Vec::new(),
            haven_radius: default_haven_radius(),
            policy: PersistencePolicyV1::default(),
        }
    }
}

impl CampaignConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse the configured haven list under the configured notation.
    ///
    /// Havens are direct targets: a malformed id is rejected outright.
    pub fn haven_hexes(&self) -> Result<Vec<HexId>, HexFormatError> {
        self.havens
            .iter()
            .map(|h| HexId::parse(h, self.notation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_defaults() {
        let cfg = CampaignConfig::load_from_path("/nonexistent/campaign.toml").unwrap();
        assert_eq!(cfg, CampaignConfig::default());
    }

    #[test]
    fn test_load_partial_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "notation = \"numeric4\"\nhavens = [\"0712\", \"2015\"]\nhaven_radius = 2"
        )
        .unwrap();

        let cfg = CampaignConfig::load_from_path(file.path()).unwrap();
        assert_eq!(cfg.notation, Notation::Numeric4);
        assert_eq!(cfg.haven_radius, 2);
        assert_eq!(cfg.policy, PersistencePolicyV1::default());
        assert_eq!(cfg.haven_hexes().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_haven_rejected() {
        let cfg = CampaignConfig {
            havens: vec!["??".into()],
            ..CampaignConfig::default()
        };
        assert!(cfg.haven_hexes().is_err());
    }

    #[test]
    fn test_garbage_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "notation = 7").unwrap();
        assert!(matches!(
            CampaignConfig::load_from_path(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
