//! Catalog loaders.
//!
//! A catalog is a JSON array of [`TypeDefinition`]s. [`load_catalog`] accepts
//! either a single file or a directory; in a directory every `*.json` file is
//! read in file-name order and the arrays are concatenated.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use doctype_model::TypeDefinition;

use crate::embedded;
use crate::error::{RegistryError, Result};

/// Parse the embedded built-in catalog.
///
/// # Errors
///
/// Returns [`RegistryError::Builtin`] if the embedded JSON is malformed.
pub fn builtin_catalog() -> Result<Vec<TypeDefinition>> {
    let types: Vec<TypeDefinition> = serde_json::from_str(embedded::BUILTIN_TYPES)
        .map_err(|source| RegistryError::Builtin { source })?;
    check_catalog(&types)?;
    Ok(types)
}

/// Parse a catalog from a JSON string.
///
/// `origin` is only used in error messages.
pub fn parse_catalog(json: &str, origin: &Path) -> Result<Vec<TypeDefinition>> {
    let types: Vec<TypeDefinition> =
        serde_json::from_str(json).map_err(|source| RegistryError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
    check_catalog(&types)?;
    Ok(types)
}

/// Load a catalog from a JSON file or a directory of JSON files.
///
/// # Errors
///
/// Returns an error if the path is missing, a file cannot be read or parsed,
/// or the combined catalog contains duplicate or incomplete types.
pub fn load_catalog(path: &Path) -> Result<Vec<TypeDefinition>> {
    if !path.exists() {
        return Err(RegistryError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let files = if path.is_dir() {
        catalog_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut types = Vec::new();
    for file in &files {
        let contents = fs::read_to_string(file).map_err(|source| RegistryError::Io {
            path: file.clone(),
            source,
        })?;
        let parsed: Vec<TypeDefinition> =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
                path: file.clone(),
                source,
            })?;
        tracing::debug!(file = %file.display(), types = parsed.len(), "Loaded catalog file");
        types.extend(parsed);
    }
    check_catalog(&types)?;
    tracing::info!(
        path = %path.display(),
        files = files.len(),
        types = types.len(),
        "Loaded type catalog"
    );
    Ok(types)
}

fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| RegistryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reject catalogs with empty ids/names or duplicate ids.
pub(crate) fn check_catalog(types: &[TypeDefinition]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (index, ty) in types.iter().enumerate() {
        if ty.id.trim().is_empty() {
            return Err(RegistryError::InvalidType { index, field: "id" });
        }
        if ty.name.trim().is_empty() {
            return Err(RegistryError::InvalidType {
                index,
                field: "name",
            });
        }
        if !seen.insert(ty.id.as_str()) {
            return Err(RegistryError::DuplicateType { id: ty.id.clone() });
        }
    }
    Ok(())
}
