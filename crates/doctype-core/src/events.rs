//! Classification lifecycle events.
//!
//! Each engine owns one [`EventBus`]. Delivery is synchronous and follows
//! registration order. A listener that returns an error or panics is
//! logged and counted; the remaining listeners still run and the
//! classification outcome is unaffected.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use doctype_model::AmbiguityLevel;

/// Pipeline step an [`EventKind::Error`] was raised in.
///
/// Scoring and ranking are infallible, so only the steps that touch a
/// collaborator or validate output appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Registry,
    Validation,
    Storage,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Registry => "registry",
            Phase::Validation => "validation",
            Phase::Storage => "storage",
        };
        f.write_str(s)
    }
}

/// Typed payload of a [`ClassificationEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Started {
        document_id: String,
    },
    CandidateScored {
        document_id: String,
        type_id: String,
        composite_score: f64,
    },
    Ranked {
        document_id: String,
        candidate_count: usize,
        top_type_id: Option<String>,
        refined: bool,
    },
    Completed {
        document_id: String,
        result_id: String,
        top_type_id: Option<String>,
        confidence: f64,
        ambiguity: AmbiguityLevel,
        duration_ms: i64,
    },
    Ambiguous {
        document_id: String,
        result_id: String,
        ambiguity: AmbiguityLevel,
        margin: Option<f64>,
    },
    Error {
        document_id: String,
        phase: Phase,
        message: String,
    },
}

impl EventKind {
    /// Short event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Started { .. } => "started",
            EventKind::CandidateScored { .. } => "candidate_scored",
            EventKind::Ranked { .. } => "ranked",
            EventKind::Completed { .. } => "completed",
            EventKind::Ambiguous { .. } => "ambiguous",
            EventKind::Error { .. } => "error",
        }
    }
}

/// One timestamped lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl ClassificationEvent {
    pub fn now(kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Error a listener may return.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives classification events.
pub trait EventListener: Send + Sync {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Errors are logged and counted by the bus, never propagated.
    fn on_event(&self, event: &ClassificationEvent) -> Result<(), ListenerError>;
}

impl<F> EventListener for F
where
    F: Fn(&ClassificationEvent) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, event: &ClassificationEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Engine-owned listener registry.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<(ListenerId, Arc<dyn EventListener>)>>,
    next_id: AtomicU64,
    failures: AtomicU64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .field("failures", &self.failure_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives every event emitted afterwards.
    pub fn subscribe(&self, listener: impl EventListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id is unknown.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Total listener failures since the bus was created.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Deliver an event to every listener. Returns the number that failed.
    pub fn emit(&self, event: &ClassificationEvent) -> usize {
        // Snapshot so listeners may subscribe or unsubscribe while handling.
        let listeners: Vec<Arc<dyn EventListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        let mut failed = 0;
        for listener in listeners {
            match catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    failed += 1;
                    warn!(event = event.kind.name(), %error, "Event listener failed");
                }
                Err(payload) => {
                    failed += 1;
                    warn!(
                        event = event.kind.name(),
                        panic = panic_message(payload.as_ref()),
                        "Event listener panicked"
                    );
                }
            }
        }
        if failed > 0 {
            self.failures.fetch_add(failed as u64, Ordering::Relaxed);
        }
        failed
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn started() -> ClassificationEvent {
        ClassificationEvent::now(EventKind::Started {
            document_id: "doc".into(),
        })
    }

    #[test]
    fn phase_display_matches_wire_name() {
        for phase in [Phase::Registry, Phase::Validation, Phase::Storage] {
            let wire = serde_json::to_value(phase).unwrap();
            assert_eq!(wire, phase.to_string());
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |_: &ClassificationEvent| -> Result<(), ListenerError> {
                seen.lock().unwrap().push(tag);
                Ok(())
            });
        }
        assert_eq!(bus.emit(&started()), 0);
        assert_eq!(*seen.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn failures_are_isolated_and_counted() {
        let bus = EventBus::new();
        let reached = Arc::new(AtomicU64::new(0));
        bus.subscribe(|_: &ClassificationEvent| -> Result<(), ListenerError> {
            Err("listener refused".into())
        });
        bus.subscribe(|_: &ClassificationEvent| -> Result<(), ListenerError> {
            panic!("listener exploded")
        });
        let counter = Arc::clone(&reached);
        bus.subscribe(move |_: &ClassificationEvent| -> Result<(), ListenerError> {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

        assert_eq!(bus.emit(&started()), 2);
        assert_eq!(bus.emit(&started()), 2);
        assert_eq!(bus.failure_count(), 4);
        assert_eq!(reached.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let id = bus.subscribe(|_: &ClassificationEvent| -> Result<(), ListenerError> { Ok(()) });
        assert_eq!(bus.listener_count(), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let event = ClassificationEvent::now(EventKind::Error {
            document_id: "doc".into(),
            phase: Phase::Registry,
            message: "down".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["phase"], "registry");
        assert!(json["timestamp"].is_string());
    }
}
