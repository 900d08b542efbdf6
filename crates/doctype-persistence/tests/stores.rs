use chrono::{Duration, TimeZone, Utc};
use doctype_model::{
    AmbiguityLevel, ClassificationCandidate, ClassificationResult, ClassificationTimestamps,
    ScoreBreakdown,
};
use doctype_persistence::{JsonResultStore, MemoryResultStore, ResultStore, StoreError};
use tempfile::tempdir;

fn sample_result(id: &str, document_id: &str, minute: i64) -> ClassificationResult {
    let started = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minute);
    let mut top = ClassificationCandidate::new(
        "security-audit-report",
        "Security Audit Report",
        0.8123456789,
        ScoreBreakdown::new(0.9, 0.8, 0.7, 0.6, 0.5),
        vec!["Strong structure match (0.90)".to_string()],
    );
    top.rank = 1;
    let mut runner_up = ClassificationCandidate::new(
        "incident-report",
        "Incident Report",
        0.41,
        ScoreBreakdown::new(0.4, 0.4, 0.4, 0.4, 0.4),
        Vec::new(),
    );
    runner_up.rank = 2;
    ClassificationResult {
        id: id.to_string(),
        document_id: document_id.to_string(),
        ranked_candidates: vec![top, runner_up],
        confidence_score: 0.8,
        ambiguity_level: AmbiguityLevel::None,
        reasons: vec!["Classification is clear".to_string()],
        timestamps: ClassificationTimestamps {
            started,
            completed: started + Duration::milliseconds(12),
        },
        refined: false,
    }
}

fn exercise_store(store: &dyn ResultStore) {
    store.save(&sample_result("r2", "doc-1", 5)).unwrap();
    store.save(&sample_result("r1", "doc-1", 1)).unwrap();
    store.save(&sample_result("r3", "doc-2", 3)).unwrap();

    let loaded = store.get("r1").unwrap().expect("stored result");
    assert_eq!(loaded, sample_result("r1", "doc-1", 1));
    assert!(store.get("missing").unwrap().is_none());

    let history: Vec<String> = store
        .find_by_document_id("doc-1")
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(history, ["r1", "r2"]);
    assert!(store.find_by_document_id("doc-9").unwrap().is_empty());
}

#[test]
fn memory_store_round_trip() {
    let store = MemoryResultStore::new();
    exercise_store(&store);
    assert_eq!(store.len(), 3);
}

#[test]
fn json_store_round_trip() {
    let dir = tempdir().unwrap();
    let store = JsonResultStore::open(dir.path()).unwrap();
    exercise_store(&store);

    let path = store.path_for("r1").unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_store_overwrites_same_id() {
    let dir = tempdir().unwrap();
    let store = JsonResultStore::open(dir.path()).unwrap();
    let mut result = sample_result("r1", "doc-1", 0);
    store.save(&result).unwrap();
    result.confidence_score = 0.5;
    store.save(&result).unwrap();
    assert_eq!(store.get("r1").unwrap().unwrap().confidence_score, 0.5);
}

#[test]
fn corrupted_file_is_reported() {
    let dir = tempdir().unwrap();
    let store = JsonResultStore::open(dir.path()).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

    let err = store.find_by_document_id("doc-1").unwrap_err();
    assert!(matches!(err, StoreError::Deserialization { .. }));
    assert!(err.suggestion().is_some());
}

#[tokio::test]
async fn async_save_and_load() {
    let dir = tempdir().unwrap();
    let store = JsonResultStore::open(dir.path()).unwrap();
    store
        .save_async(sample_result("async-1", "doc-1", 0))
        .await
        .unwrap();
    let loaded = store.get_async("async-1".to_string()).await.unwrap();
    assert_eq!(loaded.map(|r| r.document_id), Some("doc-1".to_string()));
}
