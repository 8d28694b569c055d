//! mindset-engine - Mindset classification and content selection
//!
//! Classifies a learner's answers into a communication / learning style
//! and uses that style to pick content from tabular course datasets.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mindset_engine::{EngineConfig, PersonalizationEngine};
//!
//! let engine = PersonalizationEngine::init(EngineConfig::load()?)?;
//!
//! // Classify
//! let result = engine.classify(&answers)?;
//!
//! // Select content for the style
//! let courses = engine.select("course_catalog", result.style)?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! answers ──► Classifier (weighted | sum) ──► MindsetStyle
//!                                                │
//! DatasetStore ──► ContentTable ──► ContentSelector ──► rows
//! ```
//!
//! The classifier and selector are pure and hold no mutable state; the
//! dataset store loads each file at most once and shares it read-only.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod selector;
pub mod tables;
pub mod types;

// Core types
pub use error::EngineError;
pub use types::*;

// Classification
pub use classifier::{ClassificationStrategy, Classifier, EmptyAnswerPolicy, SumClassifier, WeightedClassifier};

// Selection
pub use selector::{ContentSelector, MissingDifficulty, Sampling, DEFAULT_SAMPLE_SEED};

// Datasets and façade
pub use config::EngineConfig;
pub use dataset::{ContentTable, DatasetStore};
pub use engine::{PersonalizationEngine, PersonalizedPath, SelectionResult};
