//! The result store collaborator and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use doctype_model::ClassificationResult;

use crate::error::Result;

/// Destination for classification results.
///
/// The engine saves each validated result once; lookups are used by callers
/// and the CLI.
pub trait ResultStore: Send + Sync {
    /// Persist a result, replacing any result with the same id.
    fn save(&self, result: &ClassificationResult) -> Result<()>;

    /// Look up a result by id.
    fn get(&self, id: &str) -> Result<Option<ClassificationResult>>;

    /// All results for a document, oldest first.
    fn find_by_document_id(&self, document_id: &str) -> Result<Vec<ClassificationResult>>;
}

/// Store that keeps results in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: Mutex<BTreeMap<String, ClassificationResult>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ClassificationResult>> {
        // Writes are single inserts, so a poisoned map is still whole.
        self.results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ResultStore for MemoryResultStore {
    fn save(&self, result: &ClassificationResult) -> Result<()> {
        self.lock().insert(result.id.clone(), result.clone());
        tracing::debug!(result_id = %result.id, "Stored result in memory");
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<ClassificationResult>> {
        Ok(self.lock().get(id).cloned())
    }

    fn find_by_document_id(&self, document_id: &str) -> Result<Vec<ClassificationResult>> {
        let mut found: Vec<ClassificationResult> = self
            .lock()
            .values()
            .filter(|r| r.document_id == document_id)
            .cloned()
            .collect();
        sort_oldest_first(&mut found);
        Ok(found)
    }
}

/// Sort by start time, then id, so lookups are deterministic.
pub(crate) fn sort_oldest_first(results: &mut [ClassificationResult]) {
    results.sort_by(|a, b| {
        a.timestamps
            .started
            .cmp(&b.timestamps.started)
            .then_with(|| a.id.cmp(&b.id))
    });
}
