//! Document type catalogs and the registry collaborator.
//!
//! This crate provides:
//!
//! - [`TypeRegistry`]: read-only source of type definitions consumed by the
//!   classification engine
//! - [`StaticRegistry`]: in-memory registry over a list of types
//! - [`builtin_catalog`]: the embedded fallback catalog
//! - [`load_catalog`]: JSON catalog loader for files and directories
//!
//! # Catalog Directory Structure
//!
//! ```text
//! catalog/
//! ├── compliance.json      # JSON array of type definitions
//! ├── technical.json
//! └── ...
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use doctype_standards::{StaticRegistry, TypeRegistry};
//!
//! let registry = StaticRegistry::from_path(Path::new("catalog"))?;
//! for ty in registry.all_types()? {
//!     println!("{}: {} sections", ty.id, ty.section_count());
//! }
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{RegistryError, Result};
pub use loader::{builtin_catalog, load_catalog, parse_catalog};
pub use registry::{StaticRegistry, TypeRegistry};
