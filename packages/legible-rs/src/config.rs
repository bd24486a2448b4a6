//! Tunables for text assembly.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "min_confidence": 0.8, "max_groups": 2, "seed": 7 }
//! ```
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::{KMeansElbow, Seeding, DEFAULT_ITERATIONS};

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.49;
/// Threshold used where only high-certainty text should survive.
pub const STRICT_MIN_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.2;
pub const DEFAULT_MAX_GROUPS: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Fragments at or below this confidence are dropped.
    pub min_confidence: f64,
    /// Relative error improvement needed to accept another group.
    pub cluster_threshold: f64,
    pub max_groups: usize,
    pub iterations: usize,
    pub seeding: Seeding,
    /// Fixed seed for centroid initialization. Entropy when absent.
    pub seed: Option<u64>,
    /// Fall back to plain text when grouping yields nothing.
    pub fallback_to_plain: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            max_groups: DEFAULT_MAX_GROUPS,
            iterations: DEFAULT_ITERATIONS,
            seeding: Seeding::default(),
            seed: None,
            fallback_to_plain: true,
        }
    }
}

impl AssemblyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !(self.cluster_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cluster_threshold must be non-negative, got {}",
                self.cluster_threshold
            )));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be at least 1".into()));
        }
        Ok(())
    }

    pub fn elbow(&self) -> KMeansElbow {
        KMeansElbow::new(self.cluster_threshold, self.max_groups)
            .with_iterations(self.iterations)
            .with_seeding(self.seeding)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
