//! Dataset Store
//!
//! Read-only cache of the tabular content datasets. A store is opened once
//! over a data directory; every `<content-id>.csv` found there is registered
//! and parsed on first use, then shared as `Arc<ContentTable>`.
//!
//! Unknown content ids surface as `EngineError::NotFound`.

use crate::error::{EngineError, Result};
use crate::selector::{sample_rows, Sampling};
use crate::types::ContentRow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Content ids the learning-path backend ships with
pub const LEARNING_PATH_CORE: &str = "learning_path_core";
pub const PSYCHOLOGICAL_QUESTIONS: &str = "psychological_questions";
pub const SKILL_MAPPING: &str = "skill_mapping";
pub const COURSE_CATALOG: &str = "course_catalog";

/// Number of questions handed out when the caller doesn't ask for a count
pub const DEFAULT_QUESTION_SAMPLE: usize = 5;

/// A loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct ContentTable {
    pub id: String,
    pub headers: Vec<String>,
    pub rows: Vec<ContentRow>,
}

impl ContentTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug)]
struct DatasetEntry {
    path: PathBuf,
    table: OnceLock<Arc<ContentTable>>,
}

/// Lazily-loaded, read-only dataset cache
#[derive(Debug)]
pub struct DatasetStore {
    root: PathBuf,
    entries: BTreeMap<String, DatasetEntry>,
}

/// A directory that can't be listed is a server-side problem, not bad input
fn data_dir_error(dir: &Path, e: glob::PatternError) -> EngineError {
    EngineError::DataDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    }
}

impl DatasetStore {
    /// Register every `*.csv` file under `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(EngineError::NotFound(format!(
                "data directory {}",
                dir.display()
            )));
        }

        let pattern = format!("{}/*.csv", glob::Pattern::escape(&dir.to_string_lossy()));
        let paths = glob::glob(&pattern).map_err(|e| data_dir_error(dir, e))?;

        let mut entries = BTreeMap::new();
        for path in paths {
            let path = match path {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("Skipping unreadable dataset path: {}", e);
                    continue;
                }
            };
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            entries.insert(
                id,
                DatasetEntry {
                    path,
                    table: OnceLock::new(),
                },
            );
        }

        tracing::info!("Registered {} dataset(s) under {:?}", entries.len(), dir);
        Ok(Self {
            root: dir.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registered content ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Fetch a dataset, parsing it on first access
    pub fn get(&self, id: &str) -> Result<Arc<ContentTable>> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        if let Some(table) = entry.table.get() {
            return Ok(Arc::clone(table));
        }

        let loaded = Arc::new(load_csv(id, &entry.path)?);
        Ok(Arc::clone(entry.table.get_or_init(|| loaded)))
    }

    /// Row count per dataset; loads everything
    pub fn summary(&self) -> Result<BTreeMap<String, usize>> {
        self.entries
            .keys()
            .map(|id| -> Result<(String, usize)> { Ok((id.clone(), self.get(id)?.len())) })
            .collect()
    }

    /// A handful of psychological questions for the assessment screen
    pub fn sample_questions(&self, count: usize, sampling: Sampling) -> Result<Vec<ContentRow>> {
        let questions = self.get(PSYCHOLOGICAL_QUESTIONS)?;
        Ok(sample_rows(&questions.rows, count, sampling))
    }
}

fn load_csv(id: &str, path: &Path) -> Result<ContentTable> {
    let dataset_err = |source: csv::Error| EngineError::Dataset {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(dataset_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(dataset_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(dataset_err)?;
        let mut row = ContentRow::new();
        for (field, cell) in headers.iter().zip(record.iter()) {
            let value = if cell.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::Value::String(cell.to_string())
            };
            row.fields.insert(field.clone(), value);
        }
        rows.push(row);
    }

    tracing::info!("Loaded dataset {} ({} rows) from {:?}", id, rows.len(), path);
    Ok(ContentTable {
        id: id.to_string(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn setup_store() -> (DatasetStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "course_catalog.csv",
            "course_id, title ,difficulty\nC1,Rust Basics,Beginner\nC2,Async Rust,Advanced\nC3,Traits,\n",
        );
        write(
            dir.path(),
            "psychological_questions.csv",
            "question_id,question\nq1,How do you explain a plan?\nq2,How do you prepare?\nq3,How do you learn?\n",
        );
        write(dir.path(), "notes.txt", "not a dataset");
        let store = DatasetStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_open_registers_csv_only() {
        let (store, _dir) = setup_store();
        assert_eq!(store.ids(), vec!["course_catalog", "psychological_questions"]);
        assert!(!store.contains("notes"));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = DatasetStore::open(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_unlistable_directory_is_server_error() {
        let err = data_dir_error(Path::new("/data"), glob::PatternError { pos: 0, msg: "invalid range pattern" });
        assert!(matches!(&err, EngineError::DataDir { path, .. } if path == Path::new("/data")));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (store, _dir) = setup_store();
        assert!(matches!(
            store.get("skill_mapping"),
            Err(EngineError::NotFound(id)) if id == "skill_mapping"
        ));
    }

    #[test]
    fn test_get_parses_rows_and_caches() {
        let (store, _dir) = setup_store();
        let table = store.get(COURSE_CATALOG).unwrap();

        assert_eq!(table.headers, vec!["course_id", "title", "difficulty"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[1].difficulty(), Some("Advanced"));
        assert_eq!(table.rows[2].get("difficulty"), Some(&serde_json::Value::Null));

        let again = store.get(COURSE_CATALOG).unwrap();
        assert!(Arc::ptr_eq(&table, &again));
    }

    #[test]
    fn test_summary_counts_rows() {
        let (store, _dir) = setup_store();
        let summary = store.summary().unwrap();
        assert_eq!(summary.get(COURSE_CATALOG), Some(&3));
        assert_eq!(summary.get(PSYCHOLOGICAL_QUESTIONS), Some(&3));
    }

    #[test]
    fn test_sample_questions_clamps_to_available() {
        let (store, _dir) = setup_store();
        let questions = store
            .sample_questions(DEFAULT_QUESTION_SAMPLE, Sampling::default())
            .unwrap();
        assert_eq!(questions.len(), 3);

        let two = store.sample_questions(2, Sampling::default()).unwrap();
        assert_eq!(two, store.sample_questions(2, Sampling::default()).unwrap());
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn test_malformed_csv_is_dataset_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "broken.csv", "a,b\n1,2,3\n");
        let store = DatasetStore::open(dir.path()).unwrap();
        assert!(matches!(store.get("broken"), Err(EngineError::Dataset { .. })));
    }
}
