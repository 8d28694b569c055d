//! Content Selector
//!
//! Maps a mindset style to a transformation over a content table:
//! - Short: seeded random half of the rows
//! - Elaborate: every row, unchanged
//! - Realistic: only Intermediate / Advanced rows
//!
//! The source slice is never mutated; callers get freshly cloned rows.

use crate::error::{EngineError, Result};
use crate::types::{ContentRow, MindsetStyle};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed used for Short-mode sampling unless the caller picks another
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Fraction of rows kept in Short mode
pub const SHORT_FRACTION: f64 = 0.5;

/// Difficulty labels kept in Realistic mode
pub const REALISTIC_DIFFICULTIES: [&str; 2] = ["Intermediate", "Advanced"];

/// How Short-mode samples are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    /// Reproducible: same table, same seed, same rows
    Seeded(u64),
    /// Fresh entropy on every call
    Unseeded,
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling::Seeded(DEFAULT_SAMPLE_SEED)
    }
}

/// Realistic-mode handling of rows without a difficulty
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissingDifficulty {
    /// Keep the row
    #[default]
    Keep,
    /// Fail with `MissingField`
    Reject,
}

/// Applies the per-style selection policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSelector {
    pub sampling: Sampling,
    pub missing_difficulty: MissingDifficulty,
}

impl ContentSelector {
    pub fn new(sampling: Sampling, missing_difficulty: MissingDifficulty) -> Self {
        Self { sampling, missing_difficulty }
    }

    pub fn select(&self, content: &[ContentRow], style: MindsetStyle) -> Result<Vec<ContentRow>> {
        let selected = match style {
            MindsetStyle::Short => self.sample_half(content),
            MindsetStyle::Elaborate => content.to_vec(),
            MindsetStyle::Realistic => self.filter_realistic(content)?,
        };
        tracing::debug!(%style, input = content.len(), output = selected.len(), "content selected");
        Ok(selected)
    }

    /// Parse the mode string, then select
    pub fn select_by_name(&self, content: &[ContentRow], mode: &str) -> Result<Vec<ContentRow>> {
        let style: MindsetStyle = mode.parse()?;
        self.select(content, style)
    }

    fn sample_half(&self, content: &[ContentRow]) -> Vec<ContentRow> {
        let amount = short_sample_size(content.len());
        sample_rows(content, amount, self.sampling)
    }

    fn filter_realistic(&self, content: &[ContentRow]) -> Result<Vec<ContentRow>> {
        let mut kept = Vec::new();
        for (i, row) in content.iter().enumerate() {
            match row.difficulty() {
                Some(level) => {
                    if is_realistic_level(level) {
                        kept.push(row.clone());
                    }
                }
                None => match self.missing_difficulty {
                    MissingDifficulty::Keep => kept.push(row.clone()),
                    MissingDifficulty::Reject => {
                        return Err(EngineError::MissingField {
                            field: ContentRow::DIFFICULTY.to_string(),
                            row: i,
                        })
                    }
                },
            }
        }
        Ok(kept)
    }
}

/// round(len * 0.5), half away from zero
///
/// Not banker's rounding: a one-row table yields its row, five rows yield three.
pub fn short_sample_size(len: usize) -> usize {
    ((len as f64) * SHORT_FRACTION).round() as usize
}

fn is_realistic_level(level: &str) -> bool {
    REALISTIC_DIFFICULTIES
        .iter()
        .any(|wanted| wanted.eq_ignore_ascii_case(level))
}

/// Uniformly pick `amount` rows, keeping their original relative order
pub fn sample_rows(content: &[ContentRow], amount: usize, sampling: Sampling) -> Vec<ContentRow> {
    let amount = amount.min(content.len());
    let indices = match sampling {
        Sampling::Seeded(seed) => pick_indices(&mut ChaCha8Rng::seed_from_u64(seed), content.len(), amount),
        Sampling::Unseeded => pick_indices(&mut rand::thread_rng(), content.len(), amount),
    };
    indices.into_iter().map(|i| content[i].clone()).collect()
}

fn pick_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    let mut picked = index::sample(rng, len, amount).into_vec();
    picked.sort_unstable();
    picked
}
