//! Type registry collaborator.
//!
//! The classification engine only ever reads from a registry. Registries are
//! shared across threads, so implementations must be `Send + Sync`.

use std::path::Path;

use doctype_model::{DocumentCategory, TypeDefinition};

use crate::error::Result;
use crate::loader::{builtin_catalog, check_catalog, load_catalog};

/// Source of document type definitions.
pub trait TypeRegistry: Send + Sync {
    /// Return every known type, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing source cannot be read.
    fn all_types(&self) -> Result<Vec<TypeDefinition>>;

    /// Find a type by id (case-insensitive).
    fn find(&self, id: &str) -> Result<Option<TypeDefinition>> {
        Ok(self
            .all_types()?
            .into_iter()
            .find(|t| t.id.eq_ignore_ascii_case(id)))
    }
}

/// Registry backed by an in-memory list of types.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    types: Vec<TypeDefinition>,
}

impl StaticRegistry {
    /// Create a registry from a list of types.
    ///
    /// # Errors
    ///
    /// Returns an error if ids are duplicated or ids/names are empty.
    pub fn new(types: Vec<TypeDefinition>) -> Result<Self> {
        check_catalog(&types)?;
        Ok(Self { types })
    }

    /// Registry over the embedded built-in catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            types: builtin_catalog()?,
        })
    }

    /// Registry over a catalog file or directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self {
            types: load_catalog(path)?,
        })
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if the registry holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Borrow the types.
    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Types belonging to a category.
    pub fn types_in_category(&self, category: DocumentCategory) -> Vec<&TypeDefinition> {
        self.types
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }
}

impl TypeRegistry for StaticRegistry {
    fn all_types(&self) -> Result<Vec<TypeDefinition>> {
        Ok(self.types.clone())
    }

    fn find(&self, id: &str) -> Result<Option<TypeDefinition>> {
        Ok(self
            .types
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_finds_types() {
        let registry = StaticRegistry::builtin().expect("builtin registry");
        let found = registry
            .find("SECURITY-AUDIT-REPORT")
            .expect("lookup")
            .expect("type exists");
        assert_eq!(found.name, "Security Audit Report");
        assert!(registry.find("missing").expect("lookup").is_none());
    }

    #[test]
    fn types_grouped_by_category() {
        let registry = StaticRegistry::builtin().expect("builtin registry");
        let operational = registry.types_in_category(DocumentCategory::Operational);
        assert!(operational.iter().any(|t| t.id == "incident-report"));
    }

    #[test]
    fn all_types_preserves_order() {
        let registry = StaticRegistry::new(vec![
            TypeDefinition::new("b", "B", DocumentCategory::General),
            TypeDefinition::new("a", "A", DocumentCategory::General),
        ])
        .expect("registry");
        let ids: Vec<String> = registry
            .all_types()
            .expect("types")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
