//! String key-value storage for Book Bazaar.
//!
//! The board keeps its state as a handful of JSON documents under fixed
//! keys, the same way a browser page uses `localStorage`. This crate
//! provides that storage surface without interpreting the documents.
//!
//! # Storage Backends
//!
//! All backends implement the [`KeyValueStore`] trait:
//!
//! - [`InMemoryKeyValueStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileKeyValueStore`] -- one file per key under a data directory
//!
//! # Design Rules
//!
//! 1. Values are opaque strings; the store never parses them.
//! 2. A `set` is complete when it returns. Last write wins.
//! 3. Keys are restricted to `[A-Za-z0-9_-]` so they map directly to file names.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod key;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKeyValueStore;
pub use key::validate_key;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
