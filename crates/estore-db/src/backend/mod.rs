//! # Storage Backends
//!
//! The narrow byte-level interface under the Collection Store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database::load / save  (typed, whole collection, JSON)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<dyn Backend>                                                       │
//! │   ├── FileBackend    <data_dir>/<name>.json, receipts/<file>.txt       │
//! │   └── MemoryBackend  HashMap<name, bytes>  (tests, demos)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A backend knows nothing about record types. It reads and writes whole
//! byte blobs by collection name, and stores exported text files.

pub mod file;
pub mod memory;

use std::fmt;

use crate::error::DbResult;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Byte storage for named collections and exported text.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Reads the stored blob for `name`. `Ok(None)` means nothing is stored.
    fn read(&self, name: &str) -> DbResult<Option<Vec<u8>>>;

    /// Replaces the stored blob for `name`.
    fn write(&self, name: &str, bytes: &[u8]) -> DbResult<()>;

    /// Stores an exported text document and returns where it went.
    fn export_text(&self, file_name: &str, contents: &str) -> DbResult<String>;
}
