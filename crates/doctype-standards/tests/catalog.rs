use std::fs;

use doctype_standards::{RegistryError, StaticRegistry, TypeRegistry, load_catalog};
use tempfile::tempdir;

const TECHNICAL: &str = r#"[
    {"id": "api-doc", "name": "API Documentation", "category": "technical",
     "required_sections": ["Overview", "Endpoints"]}
]"#;

const LEGAL: &str = r#"[
    {"id": "nda", "name": "Non-Disclosure Agreement", "category": "legal",
     "required_sections": ["Parties", "Confidential Information", "Term"]}
]"#;

#[test]
fn loads_single_catalog_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("technical.json");
    fs::write(&path, TECHNICAL).unwrap();

    let types = load_catalog(&path).expect("load catalog");
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].id, "api-doc");
}

#[test]
fn loads_directory_in_file_name_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b_legal.json"), LEGAL).unwrap();
    fs::write(dir.path().join("a_technical.json"), TECHNICAL).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let registry = StaticRegistry::from_path(dir.path()).expect("load registry");
    let ids: Vec<String> = registry
        .all_types()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["api-doc", "nda"]);
}

#[test]
fn duplicate_ids_across_files_are_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one.json"), TECHNICAL).unwrap();
    fs::write(dir.path().join("two.json"), TECHNICAL).unwrap();

    let err = load_catalog(dir.path()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateType { .. }));
}

#[test]
fn missing_path_is_reported() {
    let dir = tempdir().unwrap();
    let err = load_catalog(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[test]
fn malformed_json_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"id\": ").unwrap();

    let err = load_catalog(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}
