//! Core types for the mindset engine
//!
//! Everything here is plain data:
//! - Answers come in as a map of question id to value
//! - Styles are a closed set of three
//! - Content rows are opaque records; only `difficulty` is ever inspected

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A learner's dominant communication / learning style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MindsetStyle {
    /// Concise, key points first
    Short,
    /// Full context and narrative
    Elaborate,
    /// Concrete, evidence-driven
    Realistic,
}

impl MindsetStyle {
    /// Tie-break priority order, highest first
    pub const PRIORITY: [MindsetStyle; 3] =
        [MindsetStyle::Short, MindsetStyle::Elaborate, MindsetStyle::Realistic];

    pub fn name(&self) -> &'static str {
        match self {
            MindsetStyle::Short => "Short",
            MindsetStyle::Elaborate => "Elaborate",
            MindsetStyle::Realistic => "Realistic",
        }
    }
}

impl fmt::Display for MindsetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MindsetStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(MindsetStyle::Short),
            "elaborate" => Ok(MindsetStyle::Elaborate),
            "realistic" => Ok(MindsetStyle::Realistic),
            _ => Err(EngineError::InvalidCategory(s.to_string())),
        }
    }
}

/// One answer as submitted by a learner
///
/// Letters feed the weighted strategy, numbers feed the sum strategy.
/// Anything else (null, booleans, nested values) is kept as `Other` and
/// ignored by both strategies rather than failing the whole answer set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl AnswerValue {
    /// Normalized option letter: trimmed and upper-cased
    pub fn as_option(&self) -> Option<String> {
        match self {
            AnswerValue::Text(s) => Some(s.trim().to_uppercase()),
            _ => None,
        }
    }

    /// Finite numeric value for the sum strategy
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AnswerValue::Number(n) => *n as f64,
            AnswerValue::Float(f) => *f,
            AnswerValue::Text(s) => s.trim().parse().ok()?,
            AnswerValue::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n)
    }
}

/// Question id -> answer
pub type AnswerSet = HashMap<String, AnswerValue>;

/// Accumulated score per style
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreTally {
    #[serde(rename = "Short")]
    pub short: u32,
    #[serde(rename = "Elaborate")]
    pub elaborate: u32,
    #[serde(rename = "Realistic")]
    pub realistic: u32,
}

impl ScoreTally {
    pub fn get(&self, style: MindsetStyle) -> u32 {
        match style {
            MindsetStyle::Short => self.short,
            MindsetStyle::Elaborate => self.elaborate,
            MindsetStyle::Realistic => self.realistic,
        }
    }

    pub fn add(&mut self, style: MindsetStyle, weight: u32) {
        match style {
            MindsetStyle::Short => self.short += weight,
            MindsetStyle::Elaborate => self.elaborate += weight,
            MindsetStyle::Realistic => self.realistic += weight,
        }
    }

    pub fn total(&self) -> u32 {
        self.short.saturating_add(self.elaborate).saturating_add(self.realistic)
    }

    /// Each style's share of the total, 0-100; all zero when nothing scored
    pub fn percentages(&self) -> StylePercentages {
        let total = self.total();
        let share = |score: u32| {
            if total == 0 {
                0
            } else {
                ((score as f64 / total as f64) * 100.0).round() as u32
            }
        };
        StylePercentages {
            short: share(self.short),
            elaborate: share(self.elaborate),
            realistic: share(self.realistic),
        }
    }

    /// Highest score wins; ties go to the earliest style in `MindsetStyle::PRIORITY`
    pub fn dominant(&self) -> MindsetStyle {
        let mut best = MindsetStyle::PRIORITY[0];
        for style in MindsetStyle::PRIORITY.iter().skip(1) {
            if self.get(*style) > self.get(best) {
                best = *style;
            }
        }
        best
    }
}

/// Per-style share of the total score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StylePercentages {
    #[serde(rename = "Short")]
    pub short: u32,
    #[serde(rename = "Elaborate")]
    pub elaborate: u32,
    #[serde(rename = "Realistic")]
    pub realistic: u32,
}

impl StylePercentages {
    pub fn get(&self, style: MindsetStyle) -> u32 {
        match style {
            MindsetStyle::Short => self.short,
            MindsetStyle::Elaborate => self.elaborate,
            MindsetStyle::Realistic => self.realistic,
        }
    }
}

/// Which classification strategy produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Weighted,
    Sum,
}

/// Full classification output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub style: MindsetStyle,
    pub scores: ScoreTally,
    pub strategy: StrategyKind,
    pub explanation: String,
    pub suggested_content: Vec<String>,
    pub next_step: String,
    /// Dominant score as a share of the total, 0-100
    pub match_percentage: u32,
    /// Every style's share of the total, 0-100
    pub percentages: StylePercentages,
    /// Number of answers that contributed to the scores
    pub answered: usize,
}

/// One row of course content
///
/// Opaque to the engine apart from the `difficulty` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ContentRow {
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ContentRow {
    pub const DIFFICULTY: &'static str = "difficulty";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }

    /// The difficulty label, if present and non-blank
    pub fn difficulty(&self) -> Option<&str> {
        self.get(Self::DIFFICULTY)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Static advice attached to each style
#[derive(Debug, Clone, Serialize)]
pub struct StyleProfile {
    pub style: MindsetStyle,
    pub title: &'static str,
    pub description: &'static str,
    pub learning_approach: [&'static str; 4],
    pub resume_style: &'static str,
    pub interview_style: &'static str,
}
