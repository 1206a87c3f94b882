//! Document store seam for student records.
//!
//! Actions only see [`StudentStore`]; the sidecar hands them the SQLite
//! implementation and unit tests hand them the in-memory one.

#[cfg(test)]
pub mod memory;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::model::{Level, StudentPatch, StudentRecord};
use serde_json::{Map, Value};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("student_id already exists: {0}")]
    Duplicate(String),
}

/// Count filter. The default matches every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    pub level: Option<Level>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn level(level: Level) -> Self {
        Self { level: Some(level) }
    }
}

/// Keeps only the named top-level fields of a document.
pub fn project(doc: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    doc.into_iter()
        .filter(|(k, _)| fields.contains(&k.as_str()))
        .collect()
}

pub trait StudentStore {
    fn find_one(&self, student_id: &str) -> StoreResult<Option<StudentRecord>>;

    /// Every record in insertion order, optionally reduced to `projection`.
    fn find_many(&self, projection: Option<&[&str]>) -> StoreResult<Vec<Map<String, Value>>>;

    fn count(&self, filter: Filter) -> StoreResult<u64>;

    /// Fails with [`StoreError::Duplicate`] when the id is taken.
    fn insert_one(&self, record: &StudentRecord) -> StoreResult<()>;

    /// Returns the number of matched records (0 or 1).
    fn update_one(&self, student_id: &str, patch: &StudentPatch) -> StoreResult<u64>;

    /// Returns the number of deleted records (0 or 1).
    fn delete_one(&self, student_id: &str) -> StoreResult<u64>;
}
