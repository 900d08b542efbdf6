//! Engine statistics and the bounded result cache.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;

use doctype_model::ClassificationResult;

/// Running totals for one engine instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineStatistics {
    /// Classifications that produced a result.
    pub successful: u64,
    /// Classifications that ended in an error.
    pub failed: u64,
    /// Timed calls that expired; their late outcomes are discarded.
    pub timed_out: u64,
    /// Successful classifications flagged for review.
    pub ambiguous: u64,
    /// Successful classifications that went through the re-ranking pass.
    pub refined: u64,
    /// Results that could not be persisted.
    pub store_failures: u64,
    /// Event listener errors and panics.
    pub listener_failures: u64,
    /// Sum of successful run durations.
    pub total_duration_ms: i64,
    pub last_classified_at: Option<DateTime<Utc>>,
}

impl EngineStatistics {
    pub fn total(&self) -> u64 {
        self.successful + self.failed + self.timed_out
    }

    /// Mean duration of successful runs, 0 when there are none.
    pub fn average_duration_ms(&self) -> f64 {
        if self.successful == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.successful as f64
        }
    }

    pub(crate) fn record_success(&mut self, result: &ClassificationResult) {
        self.successful += 1;
        self.total_duration_ms += result.timestamps.duration_ms().max(0);
        if result.needs_review() {
            self.ambiguous += 1;
        }
        if result.refined {
            self.refined += 1;
        }
        self.last_classified_at = Some(result.timestamps.completed);
    }
}

/// Insertion-ordered cache that evicts the oldest result when full.
#[derive(Debug, Default)]
pub(crate) struct ResultCache {
    capacity: usize,
    order: VecDeque<String>,
    results: HashMap<String, ClassificationResult>,
}

impl ResultCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            results: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, result: ClassificationResult) {
        if self.capacity == 0 {
            return;
        }
        if self.results.contains_key(&result.id) {
            self.order.retain(|id| id != &result.id);
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(evicted) => {
                    self.results.remove(&evicted);
                }
                None => break,
            }
        }
        self.order.push_back(result.id.clone());
        self.results.insert(result.id.clone(), result);
    }

    pub(crate) fn get(&self, id: &str) -> Option<&ClassificationResult> {
        self.results.get(id)
    }

    /// Cached results for a document, oldest first.
    pub(crate) fn for_document(&self, document_id: &str) -> Vec<ClassificationResult> {
        self.order
            .iter()
            .filter_map(|id| self.results.get(id))
            .filter(|result| result.document_id == document_id)
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_model::{AmbiguityLevel, ClassificationTimestamps};

    fn result(id: &str, document_id: &str) -> ClassificationResult {
        let now = Utc::now();
        ClassificationResult {
            id: id.into(),
            document_id: document_id.into(),
            ranked_candidates: Vec::new(),
            confidence_score: 0.0,
            ambiguity_level: AmbiguityLevel::VeryHigh,
            reasons: Vec::new(),
            timestamps: ClassificationTimestamps {
                started: now,
                completed: now,
            },
            refined: false,
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut cache = ResultCache::new(2);
        cache.insert(result("r1", "a"));
        cache.insert(result("r2", "b"));
        cache.insert(result("r3", "a"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("r1").is_none());
        let for_a: Vec<String> = cache.for_document("a").into_iter().map(|r| r.id).collect();
        assert_eq!(for_a, ["r3"]);
    }

    #[test]
    fn reinserting_refreshes_position() {
        let mut cache = ResultCache::new(2);
        cache.insert(result("r1", "a"));
        cache.insert(result("r2", "a"));
        cache.insert(result("r1", "a"));
        cache.insert(result("r3", "a"));
        assert!(cache.get("r1").is_some());
        assert!(cache.get("r2").is_none());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut cache = ResultCache::new(0);
        cache.insert(result("r1", "a"));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn averages_successful_runs() {
        let mut stats = EngineStatistics::default();
        assert_eq!(stats.average_duration_ms(), 0.0);
        stats.record_success(&result("r1", "a"));
        stats.failed += 1;
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.ambiguous, 1);
        assert!(stats.last_classified_at.is_some());
    }
}
