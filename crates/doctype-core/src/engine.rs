//! The classification engine.
//!
//! [`ClassificationEngine::classify`] runs one document through the full
//! pipeline:
//!
//! 1. Fetch every type from the registry (or the built-in catalog)
//! 2. Score each type with the composite scorer, optionally on the rayon pool
//! 3. Sort by composite score and compute confidence and ambiguity
//! 4. Optionally re-rank with the [`CandidateRanker`]
//! 5. Validate, persist, cache, and report the result

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use doctype_model::{
    ClassificationCandidate, ClassificationResult, ClassificationTimestamps, Document,
    TypeDefinition,
};
use doctype_persistence::ResultStore;
use doctype_score::{CompositeScorer, DocumentProfile};
use doctype_standards::{TypeRegistry, builtin_catalog};

use crate::config::EngineConfig;
use crate::error::{ClassifyError, Result};
use crate::events::{ClassificationEvent, EventBus, EventKind, Phase};
use crate::policy;
use crate::ranker::{CandidateRanker, descending};
use crate::stats::{EngineStatistics, ResultCache};

/// Statistics and cache share one lock.
#[derive(Debug)]
struct EngineState {
    stats: EngineStatistics,
    cache: ResultCache,
}

/// Marks the engine busy for the lifetime of one call.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Hand-off between a timed call and the blocking run it spawned.
///
/// Whichever side moves the state off `RUNNING` first decides the outcome:
/// the run commits its result, or the caller expires it and the run
/// discards whatever it produces.
#[derive(Debug)]
struct Deadline {
    state: AtomicU8,
    timeout_ms: u64,
}

impl Deadline {
    const RUNNING: u8 = 0;
    const COMMITTED: u8 = 1;
    const EXPIRED: u8 = 2;

    fn new(timeout_ms: u64) -> Self {
        Self {
            state: AtomicU8::new(Self::RUNNING),
            timeout_ms,
        }
    }

    fn transition(&self, to: u8) -> bool {
        self.state
            .compare_exchange(Self::RUNNING, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn commit(&self) -> bool {
        self.transition(Self::COMMITTED)
    }

    fn expire(&self) -> bool {
        self.transition(Self::EXPIRED)
    }
}

/// Classifies documents against a catalog of type definitions.
///
/// The engine is `Send + Sync`; share it behind an `Arc` to classify from
/// several threads at once.
pub struct ClassificationEngine {
    config: EngineConfig,
    registry: Option<Arc<dyn TypeRegistry>>,
    store: Option<Arc<dyn ResultStore>>,
    scorer: CompositeScorer,
    ranker: CandidateRanker,
    events: EventBus,
    state: Mutex<EngineState>,
    in_flight: AtomicUsize,
}

impl std::fmt::Debug for ClassificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationEngine")
            .field("config", &self.config)
            .field("has_registry", &self.registry.is_some())
            .field("has_store", &self.store.is_some())
            .field("events", &self.events)
            .finish()
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ClassificationEngine {
    /// Create an engine with no registry and no store.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scorer: CompositeScorer::new(config.scoring),
            ranker: CandidateRanker::new(config.ranker),
            state: Mutex::new(EngineState {
                stats: EngineStatistics::default(),
                cache: ResultCache::new(config.cache_capacity),
            }),
            config,
            registry: None,
            store: None,
            events: EventBus::new(),
            in_flight: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the composite scorer, e.g. to swap in a custom signal.
    #[must_use]
    pub fn with_scorer(mut self, scorer: CompositeScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's event bus, for registering listeners.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn ranker(&self) -> &CandidateRanker {
        &self.ranker
    }

    /// True while at least one classification is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Snapshot of the running statistics.
    pub fn statistics(&self) -> EngineStatistics {
        let mut stats = self.lock_state().stats.clone();
        stats.listener_failures = self.events.failure_count();
        stats
    }

    pub fn cached_result(&self, id: &str) -> Option<ClassificationResult> {
        self.lock_state().cache.get(id).cloned()
    }

    /// Cached results for a document, oldest first.
    pub fn cached_results_for_document(&self, document_id: &str) -> Vec<ClassificationResult> {
        self.lock_state().cache.for_document(document_id)
    }

    pub fn clear_cache(&self) {
        self.lock_state().cache.clear();
    }

    /// Classify one document.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::RegistryUnavailable`] when no types can be loaded
    /// - [`ClassifyError::InvalidResult`] when the assembled result breaks an
    ///   invariant (for example an empty document id)
    pub fn classify(&self, document: &Document) -> Result<ClassificationResult> {
        self.classify_until(document, None)
    }

    #[tracing::instrument(name = "classify", skip_all, fields(document_id = %document.id))]
    fn classify_until(
        &self,
        document: &Document,
        deadline: Option<&Deadline>,
    ) -> Result<ClassificationResult> {
        let _busy = BusyGuard::enter(&self.in_flight);
        let started = Utc::now();
        let start = Instant::now();

        self.emit(EventKind::Started {
            document_id: document.id.clone(),
        });

        let outcome = self.run(document, started);
        if let Some(deadline) = deadline
            && !deadline.commit()
        {
            debug!(
                timeout_ms = deadline.timeout_ms,
                duration_ms = start.elapsed().as_millis(),
                "discarding outcome of expired classification"
            );
            return Err(ClassifyError::TimedOut {
                timeout_ms: deadline.timeout_ms,
            });
        }
        match &outcome {
            Ok(result) => self.finish(result, start),
            Err(error) => {
                self.lock_state().stats.failed += 1;
                warn!(%error, duration_ms = start.elapsed().as_millis(), "classification failed");
            }
        }
        outcome
    }

    /// Classify on tokio's blocking pool, giving up after `timeout`.
    ///
    /// An expired call returns [`ClassifyError::TimedOut`] and counts in
    /// [`EngineStatistics::timed_out`]. The background run cannot be
    /// interrupted; when it finishes it discards its outcome, so nothing is
    /// stored, cached, counted as a success, or announced as `Completed`.
    /// A run that already committed when the timer fires is awaited and its
    /// result returned.
    ///
    /// # Errors
    ///
    /// Everything [`classify`](Self::classify) returns, plus `TimedOut` and
    /// `Task` when the blocking task itself fails.
    pub async fn classify_with_timeout(
        self: &Arc<Self>,
        document: Document,
        timeout: Duration,
    ) -> Result<ClassificationResult> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let deadline = Arc::new(Deadline::new(timeout_ms));
        let engine = Arc::clone(self);
        let run_deadline = Arc::clone(&deadline);
        let mut task = tokio::task::spawn_blocking(move || {
            engine.classify_until(&document, Some(&*run_deadline))
        });
        let joined = match tokio::time::timeout(timeout, &mut task).await {
            Ok(joined) => joined,
            Err(_) if deadline.expire() => {
                self.lock_state().stats.timed_out += 1;
                warn!(timeout_ms, "classification timed out");
                return Err(ClassifyError::TimedOut { timeout_ms });
            }
            Err(_) => {
                debug!(timeout_ms, "classification committed at the deadline");
                task.await
            }
        };
        joined.map_err(|join_error| ClassifyError::Task {
            message: join_error.to_string(),
        })?
    }

    fn run(
        &self,
        document: &Document,
        started: chrono::DateTime<Utc>,
    ) -> Result<ClassificationResult> {
        let types = self.load_types().inspect_err(|error| {
            self.emit_error(document, Phase::Registry, error);
        })?;

        let profile = DocumentProfile::new(document);
        let mut candidates = info_span!("score", types = types.len()).in_scope(|| {
            let start = Instant::now();
            let candidates = self.score_all(&profile, &types);
            debug!(
                candidates = candidates.len(),
                parallel = self.config.parallel_scoring,
                duration_ms = start.elapsed().as_millis(),
                "scoring complete"
            );
            candidates
        });
        for candidate in &candidates {
            self.emit(EventKind::CandidateScored {
                document_id: document.id.clone(),
                type_id: candidate.type_id.clone(),
                composite_score: candidate.composite_score,
            });
        }

        candidates.sort_by(|a, b| descending(a.composite_score, b.composite_score));
        for (index, candidate) in candidates.iter_mut().enumerate() {
            candidate.rank = index + 1;
        }

        let scores: Vec<f64> = candidates.iter().map(|c| c.composite_score).collect();
        let (confidence, ambiguity) = policy::assess(&scores, &self.config.ambiguity);
        let reasons = policy::result_reasons(candidates.first(), ambiguity, confidence);
        debug!(confidence, ambiguity = %ambiguity, "confidence computed");

        let refined = self.config.enable_refinement && !candidates.is_empty();
        let ranked = if refined {
            self.ranker.rank(candidates)
        } else {
            candidates
        };
        self.emit(EventKind::Ranked {
            document_id: document.id.clone(),
            candidate_count: ranked.len(),
            top_type_id: ranked.first().map(|c| c.type_id.clone()),
            refined,
        });

        let result = ClassificationResult {
            id: ClassificationResult::generate_id(),
            document_id: document.id.clone(),
            ranked_candidates: ranked,
            confidence_score: confidence,
            ambiguity_level: ambiguity,
            reasons,
            timestamps: ClassificationTimestamps {
                started,
                completed: Utc::now(),
            },
            refined,
        };
        result.validate().inspect_err(|error| {
            self.emit_error(document, Phase::Validation, error);
        })?;
        Ok(result)
    }

    /// Persist, record, and announce a validated result.
    fn finish(&self, result: &ClassificationResult, start: Instant) {
        let stored = match &self.store {
            Some(store) => match store.save(result) {
                Ok(()) => true,
                Err(error) => {
                    warn!(
                        result_id = %result.id,
                        %error,
                        "failed to persist classification result"
                    );
                    self.emit_error_for(&result.document_id, Phase::Storage, &error);
                    false
                }
            },
            None => true,
        };

        {
            let mut state = self.lock_state();
            state.stats.record_success(result);
            if !stored {
                state.stats.store_failures += 1;
            }
            state.cache.insert(result.clone());
        }

        if result.needs_review() {
            // Margin of the primary ranking, whatever order refinement chose.
            let mut scores: Vec<f64> = result
                .ranked_candidates
                .iter()
                .map(|c| c.composite_score)
                .collect();
            scores.sort_by(|a, b| descending(*a, *b));
            self.emit(EventKind::Ambiguous {
                document_id: result.document_id.clone(),
                result_id: result.id.clone(),
                ambiguity: result.ambiguity_level,
                margin: policy::margin(&scores),
            });
        }
        self.emit(EventKind::Completed {
            document_id: result.document_id.clone(),
            result_id: result.id.clone(),
            top_type_id: result.top_type_id().map(str::to_string),
            confidence: result.confidence_score,
            ambiguity: result.ambiguity_level,
            duration_ms: result.timestamps.duration_ms(),
        });

        info!(
            result_id = %result.id,
            top_type = result.top_type_id().unwrap_or("-"),
            confidence = result.confidence_score,
            ambiguity = %result.ambiguity_level,
            candidates = result.ranked_candidates.len(),
            refined = result.refined,
            duration_ms = start.elapsed().as_millis(),
            "classification complete"
        );
    }

    /// Registry types, or the built-in catalog when fallback is enabled.
    fn load_types(&self) -> Result<Vec<TypeDefinition>> {
        let registry_error = match &self.registry {
            Some(registry) => match registry.all_types() {
                Ok(types) => {
                    debug!(types = types.len(), "loaded types from registry");
                    return Ok(types);
                }
                Err(error) => Some(error),
            },
            None => None,
        };

        if !self.config.use_builtin_fallback {
            let message = match &registry_error {
                Some(error) => error.to_string(),
                None => "no type registry configured".to_string(),
            };
            return Err(ClassifyError::RegistryUnavailable {
                message,
                source: registry_error,
            });
        }

        if let Some(error) = &registry_error {
            warn!(%error, "type registry failed; using built-in catalog");
        } else {
            debug!("no type registry configured; using built-in catalog");
        }
        builtin_catalog().map_err(|error| ClassifyError::RegistryUnavailable {
            message: format!("built-in catalog unusable: {error}"),
            source: Some(error),
        })
    }

    /// Score every type, preserving registry order.
    fn score_all(
        &self,
        profile: &DocumentProfile<'_>,
        types: &[TypeDefinition],
    ) -> Vec<ClassificationCandidate> {
        if self.config.parallel_scoring {
            types
                .par_iter()
                .map(|definition| self.scorer.score(profile, definition))
                .collect()
        } else {
            types
                .iter()
                .map(|definition| self.scorer.score(profile, definition))
                .collect()
        }
    }

    fn emit(&self, kind: EventKind) {
        self.events.emit(&ClassificationEvent::now(kind));
    }

    fn emit_error(&self, document: &Document, phase: Phase, error: &dyn std::fmt::Display) {
        self.emit_error_for(&document.id, phase, error);
    }

    fn emit_error_for(&self, document_id: &str, phase: Phase, error: &dyn std::fmt::Display) {
        self.emit(EventKind::Error {
            document_id: document_id.to_string(),
            phase,
            message: error.to_string(),
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
