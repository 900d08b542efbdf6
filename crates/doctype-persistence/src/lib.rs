//! Storage for classification results.
//!
//! - [`ResultStore`]: the storage collaborator used by the engine
//! - [`MemoryResultStore`]: process-local store
//! - [`JsonResultStore`]: one pretty JSON file per result, written atomically
//!   (temp file + rename) so a crash never leaves a half-written result
//!
//! # Example
//!
//! ```ignore
//! use doctype_persistence::{JsonResultStore, ResultStore};
//!
//! let store = JsonResultStore::open("results")?;
//! store.save(&result)?;
//! let history = store.find_by_document_id(&result.document_id)?;
//! ```

mod error;
mod json;
mod store;

pub use error::{Result, StoreError};
pub use json::JsonResultStore;
pub use store::{MemoryResultStore, ResultStore};
