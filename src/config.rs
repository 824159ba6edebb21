//! Configuration for sectors, domain labels, paging, and scoring weights.
//!
//! Loadable from a `drillmap.toml` file; every field has a default so a
//! partial file (or none at all) works. Configuration is passed explicitly
//! into commands and core functions; there is no process-global state.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::normalize::normalize_role;

pub const DEFAULT_CONFIG_FILE: &str = "drillmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Weights for the four scoring groups. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for the operational group (0.0-1.0)
    #[serde(default = "default_operational_weight")]
    pub operational: f64,

    /// Weight for the technical/systems group (0.0-1.0)
    #[serde(default = "default_technical_weight")]
    pub technical: f64,

    /// Weight for the intelligence group (0.0-1.0)
    #[serde(default = "default_intelligence_weight")]
    pub intelligence: f64,

    /// Weight for the medical group (0.0-1.0)
    #[serde(default = "default_medical_weight")]
    pub medical: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            operational: default_operational_weight(),
            technical: default_technical_weight(),
            intelligence: default_intelligence_weight(),
            medical: default_medical_weight(),
        }
    }
}

impl ScoringWeights {
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), ConfigError> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "{name} weight must be between 0.0 and 1.0"
            )))
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_weight(self.operational, "operational")?;
        Self::validate_weight(self.technical, "technical")?;
        Self::validate_weight(self.intelligence, "intelligence")?;
        Self::validate_weight(self.medical, "medical")?;

        let sum = self.operational + self.technical + self.intelligence + self.medical;
        if (sum - 1.0).abs() > 0.001 {
            return Err(ConfigError::Invalid(format!(
                "scoring weights must sum to 1.0, but sum to {sum:.3}"
            )));
        }
        Ok(())
    }
}

fn default_operational_weight() -> f64 {
    0.80
}

fn default_technical_weight() -> f64 {
    0.10
}

fn default_intelligence_weight() -> f64 {
    0.05
}

fn default_medical_weight() -> f64 {
    0.05
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillmapConfig {
    /// The recognized sector names, in display order. Records outside this
    /// set are dropped from aggregation.
    pub sectors: Vec<String>,

    /// Canonical marker for the distinguished role class. Normalized on
    /// load so a config written with a quote variant still matches.
    pub distinguished_role: String,

    /// Record type that carries the rating set and a computed score.
    pub audit_type: String,

    /// Synthetic type label for practical drills derived from audit records.
    pub drill_label: String,

    /// Training-kind value that marks a practical drill.
    pub practical_marker: String,

    /// Group key used when a record is missing the grouped field.
    pub unknown_label: String,

    /// Paged retrieval: batch size and the fetch cap.
    pub page_size: usize,
    pub max_records: usize,

    pub weights: ScoringWeights,
}

impl Default for DrillmapConfig {
    fn default() -> Self {
        Self {
            sectors: vec![
                "אלון מורה".to_string(),
                "איתמר".to_string(),
                "ברכה".to_string(),
                "לב השומרון".to_string(),
            ],
            distinguished_role: "צמ\"מ".to_string(),
            audit_type: "ביקורת קצה מבצעי".to_string(),
            drill_label: "תרגול משימה".to_string(),
            practical_marker: "מעשי".to_string(),
            unknown_label: "לא ידוע".to_string(),
            page_size: 500,
            max_records: 5000,
            weights: ScoringWeights::default(),
        }
    }
}

impl DrillmapConfig {
    /// Load configuration: an explicit path must exist and parse; with no
    /// path, `drillmap.toml` in the working directory is used when present,
    /// the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.distinguished_role = normalize_role(&config.distinguished_role);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sectors.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one sector must be configured".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".to_string()));
        }
        self.weights.validate()
    }
}
