//! Integration tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use doctype_cli::cli::{ClassifyArgs, OutputFormatArg, TypesArgs};
use doctype_cli::commands::{
    EXIT_NEEDS_REVIEW, build_registry, exit_code, load_engine_config, read_document, run_classify,
    run_types,
};

const AUDIT_DOCUMENT: &str = r#"{
  "id": "audit-2024-q3",
  "title": "Security Audit Report Q3",
  "sections": [
    {"title": "Executive Summary", "content": "The auditors reviewed access control and privileged access against ISO 27001 and NIST SP 800-53."},
    {"title": "Scope", "content": "Production systems and SOC 2 trust criteria."},
    {"title": "Methodology", "content": "Interviews and vulnerability scanning."},
    {"title": "Findings", "content": "A critical vulnerability in account management was found."},
    {"title": "Recommendations", "content": "Rotate credentials and enforce MFA."}
  ],
  "compliance_markers": [
    {"type": "ISO27001-A.9", "text": "privileged access not reviewed", "standard": "ISO 27001", "severity": "critical"}
  ]
}"#;

const TWIN_CATALOG: &str = r#"[
  {"id": "runbook-a", "name": "Runbook", "category": "technical", "required_sections": ["Overview", "Steps"]},
  {"id": "runbook-b", "name": "Runbook", "category": "technical", "required_sections": ["Overview", "Steps"]}
]"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn classify_args(document: PathBuf) -> ClassifyArgs {
    ClassifyArgs {
        document,
        catalog: None,
        config: None,
        refine: false,
        builtin_fallback: false,
        no_builtin_fallback: false,
        store: None,
        timeout_ms: None,
        format: OutputFormatArg::Json,
        top: 5,
    }
}

#[test]
fn partial_config_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "engine.toml",
        "[ambiguity]\nconfidence_threshold = 0.5\n",
    );
    let config = load_engine_config(Some(&path)).unwrap();
    assert_eq!(config.ambiguity.confidence_threshold, 0.5);
    assert_eq!(config.ambiguity.ambiguity_threshold, 0.2);
    assert!(!config.enable_refinement);

    assert!(load_engine_config(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn sparse_document_json_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "doc.json", r#"{"id": "bare"}"#);
    let document = read_document(&path).unwrap();
    assert_eq!(document.id, "bare");
    assert!(document.sections.is_empty());
    assert!(document.metadata.is_empty());
}

#[test]
fn broken_catalog_honors_fallback_flag() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "catalog.json", "{ not json");
    assert!(build_registry(Some(&catalog), true).unwrap().is_none());
    assert!(build_registry(Some(&catalog), false).is_err());
    assert!(build_registry(None, false).unwrap().is_some());
}

#[test]
fn classify_persists_to_store() {
    let dir = tempfile::tempdir().unwrap();
    let document = write(dir.path(), "audit.json", AUDIT_DOCUMENT);
    let store = dir.path().join("results");
    let mut args = classify_args(document);
    args.store = Some(store.clone());
    args.refine = true;

    let result = run_classify(&args).unwrap();
    assert_eq!(result.top_type_id(), Some("security-audit-report"));
    assert!(result.refined);
    assert!(store.join(format!("{}.json", result.id)).exists());
}

#[test]
fn ambiguous_results_exit_with_review_code() {
    let dir = tempfile::tempdir().unwrap();
    let document = write(
        dir.path(),
        "runbook.json",
        r#"{"id": "rb", "sections": [{"title": "Overview"}, {"title": "Steps"}]}"#,
    );
    let catalog = write(dir.path(), "twins.json", TWIN_CATALOG);
    let mut args = classify_args(document);
    args.catalog = Some(catalog);
    args.format = OutputFormatArg::Table;

    let result = run_classify(&args).unwrap();
    assert_eq!(exit_code(&result), EXIT_NEEDS_REVIEW);
}

#[test]
fn classify_with_timeout_returns_result() {
    let dir = tempfile::tempdir().unwrap();
    let document = write(dir.path(), "audit.json", AUDIT_DOCUMENT);
    let mut args = classify_args(document);
    args.timeout_ms = Some(30_000);
    let result = run_classify(&args).unwrap();
    assert!(!result.ranked_candidates.is_empty());
}

#[test]
fn missing_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = classify_args(dir.path().join("nope.json"));
    let error = run_classify(&args).unwrap_err();
    assert!(format!("{error:#}").contains("read document"));
}

#[test]
fn types_lists_a_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "twins.json", TWIN_CATALOG);
    run_types(&TypesArgs {
        catalog: Some(catalog),
    })
    .unwrap();
    run_types(&TypesArgs { catalog: None }).unwrap();
}

#[test]
fn demo_files_classify_cleanly() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let mut args = classify_args(demos.join("security-audit.json"));
    args.config = Some(demos.join("engine.toml"));
    args.format = OutputFormatArg::Table;

    let config = load_engine_config(args.config.as_deref()).unwrap();
    assert!(config.enable_refinement);
    assert_eq!(config.cache_capacity, 64);

    let result = run_classify(&args).unwrap();
    assert_eq!(result.top_type_id(), Some("security-audit-report"));
    assert!(result.refined);
}
