//! Personalization façade
//!
//! Ties the classifier, the selector and the dataset store together.
//! Initialize once at startup and share; every method takes `&self`.
//!
//! ```rust,ignore
//! let engine = PersonalizationEngine::init(EngineConfig::load()?)?;
//!
//! let path = engine.personalize(&answers, "course_catalog")?;
//! println!("{} -> {} courses", path.classification.style, path.selection.count);
//! ```

use crate::classifier::Classifier;
use crate::config::EngineConfig;
use crate::dataset::{DatasetStore, DEFAULT_QUESTION_SAMPLE};
use crate::error::Result;
use crate::selector::ContentSelector;
use crate::tables;
use crate::types::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rows picked for one style from one dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionResult {
    pub content_id: String,
    pub style: MindsetStyle,
    pub count: usize,
    pub rows: Vec<ContentRow>,
}

/// Classification plus the content chosen for it
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedPath {
    pub classification: ClassificationResult,
    pub profile: StyleProfile,
    pub selection: SelectionResult,
}

pub struct PersonalizationEngine {
    config: EngineConfig,
    classifier: Box<dyn Classifier + Send + Sync>,
    selector: ContentSelector,
    datasets: DatasetStore,
}

impl PersonalizationEngine {
    /// Open the dataset store under `config.data_dir` and build the pipeline
    pub fn init(config: EngineConfig) -> Result<Self> {
        let datasets = DatasetStore::open(&config.data_dir)?;
        Ok(Self::with_store(config, datasets))
    }

    pub fn with_store(config: EngineConfig, datasets: DatasetStore) -> Self {
        let classifier = config.strategy.with_policy(config.empty_answers);
        let selector = ContentSelector::new(config.sampling(), config.missing_difficulty);
        Self {
            config,
            classifier,
            selector,
            datasets,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn datasets(&self) -> &DatasetStore {
        &self.datasets
    }

    pub fn classify(&self, answers: &AnswerSet) -> Result<ClassificationResult> {
        self.classifier.classify(answers)
    }

    pub fn select(&self, content_id: &str, style: MindsetStyle) -> Result<SelectionResult> {
        let table = self.datasets.get(content_id)?;
        let rows = self.selector.select(&table.rows, style)?;
        Ok(SelectionResult {
            content_id: content_id.to_string(),
            style,
            count: rows.len(),
            rows,
        })
    }

    /// Same as `select`, with the style given as a mode string
    pub fn select_by_name(&self, content_id: &str, mode: &str) -> Result<SelectionResult> {
        self.select(content_id, mode.parse()?)
    }

    pub fn personalize(&self, answers: &AnswerSet, content_id: &str) -> Result<PersonalizedPath> {
        let classification = self.classify(answers)?;
        let selection = self.select(content_id, classification.style)?;
        Ok(PersonalizedPath {
            profile: tables::profile(classification.style),
            classification,
            selection,
        })
    }

    pub fn profile(&self, style: MindsetStyle) -> StyleProfile {
        tables::profile(style)
    }

    pub fn dataset_summary(&self) -> Result<BTreeMap<String, usize>> {
        self.datasets.summary()
    }

    pub fn questions(&self, count: Option<usize>) -> Result<Vec<ContentRow>> {
        self.datasets
            .sample_questions(count.unwrap_or(DEFAULT_QUESTION_SAMPLE), self.config.sampling())
    }
}
