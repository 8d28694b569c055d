//! Engine configuration
//!
//! Defaults cover the common case. A JSON file named by `MINDSET_CONFIG`
//! can override any field, and `MINDSET_DATA_DIR` / `MINDSET_SAMPLE_SEED`
//! win over both.

use crate::classifier::{ClassificationStrategy, EmptyAnswerPolicy};
use crate::selector::{MissingDifficulty, Sampling, DEFAULT_SAMPLE_SEED};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "MINDSET_CONFIG";
pub const DATA_DIR_ENV: &str = "MINDSET_DATA_DIR";
pub const SEED_ENV: &str = "MINDSET_SAMPLE_SEED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding `<content-id>.csv` datasets
    pub data_dir: PathBuf,
    pub strategy: ClassificationStrategy,
    pub empty_answers: EmptyAnswerPolicy,
    pub missing_difficulty: MissingDifficulty,
    /// Seed for Short-mode sampling; `None` means fresh entropy per call
    pub sample_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            strategy: ClassificationStrategy::Weighted,
            empty_answers: EmptyAnswerPolicy::Reject,
            missing_difficulty: MissingDifficulty::Keep,
            sample_seed: Some(DEFAULT_SAMPLE_SEED),
        }
    }
}

impl EngineConfig {
    /// Defaults, then the config file (if any), then env overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(seed) = std::env::var(SEED_ENV) {
            config.sample_seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_ENV, seed))?,
            );
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn sampling(&self) -> Sampling {
        match self.sample_seed {
            Some(seed) => Sampling::Seeded(seed),
            None => Sampling::Unseeded,
        }
    }
}

fn default_data_dir() -> PathBuf {
    // XDG data dir on Linux, ~/Library/Application Support on macOS
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindset-engine")
        .join("data")
}
