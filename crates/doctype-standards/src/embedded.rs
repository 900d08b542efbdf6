//! Embedded catalog data.
//!
//! The built-in catalog is embedded at compile time using `include_str!()`
//! so the engine has a fallback that needs no file I/O.

/// Built-in document type catalog (JSON array of type definitions).
pub const BUILTIN_TYPES: &str = include_str!("../data/builtin_types.json");
