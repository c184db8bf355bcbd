//! # Collection Store
//!
//! Whole-collection persistence: every load returns a full sequence, every
//! save replaces one.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Collection Store                                │
//! │                                                                         │
//! │  Service startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(dir) ← data directory, receipt sub-directory             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config) ← picks FileBackend or MemoryBackend             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │  one Mutex per collection               │                            │
//! │  │  items │ categories │ suppliers │ ...   │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │  load(c)      missing/corrupt ⇒ []                              │
//! │       │  save(c, xs)  replace all, last write wins                      │
//! │       │  modify(c, f) lock ─► load ─► f ─► save ─► unlock               │
//! │       ▼                                                                 │
//! │  Arc<dyn Backend>                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `save` on its own takes no lock across the caller's read, so two
//! interleaved load/save pairs still lose one write. Callers that
//! read-modify-write use [`Database::modify`] or [`Database::lock`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::{Backend, FileBackend, MemoryBackend};
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use crate::repository::{Record, Repository};
use estore_core::{Actor, Bill, Category, Item, Supplier};

/// Sub-directory for exported receipts when none is configured.
pub const DEFAULT_RECEIPT_DIR: &str = "bills";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use estore_db::DbConfig;
///
/// let config = DbConfig::new("./data").receipt_dir("receipts");
/// assert_eq!(config.receipt_dir, "receipts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Directory holding `<collection>.json` files. `None` keeps everything
    /// in memory.
    pub data_dir: Option<PathBuf>,

    /// Sub-directory of `data_dir` for exported receipts.
    /// Default: "bills"
    pub receipt_dir: String,
}

impl DbConfig {
    /// File-backed store rooted at `dir`. The directory is created on the
    /// first write if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DbConfig {
            data_dir: Some(dir.into()),
            receipt_dir: DEFAULT_RECEIPT_DIR.to_string(),
        }
    }

    /// Sets the receipt sub-directory.
    pub fn receipt_dir(mut self, name: impl Into<String>) -> Self {
        self.receipt_dir = name.into();
        self
    }

    /// In-memory store (for tests and demos).
    pub fn in_memory() -> Self {
        DbConfig {
            data_dir: None,
            receipt_dir: DEFAULT_RECEIPT_DIR.to_string(),
        }
    }
}

// =============================================================================
// Mutation
// =============================================================================

/// Outcome of a [`Database::modify`] closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<R> {
    /// Save the (mutated) collection, then return the value.
    Commit(R),
    /// Leave storage untouched and return the value.
    Discard(R),
}

// =============================================================================
// Database
// =============================================================================

/// Main store handle providing collection and repository access.
///
/// Cloning is cheap and clones share the backend and the locks.
#[derive(Debug, Clone)]
pub struct Database {
    backend: Arc<dyn Backend>,
    locks: Arc<[Mutex<()>; 5]>,
}

impl Database {
    /// Opens the store described by `config`.
    pub fn new(config: DbConfig) -> Self {
        match config.data_dir {
            Some(dir) => {
                info!(
                    path = %dir.display(),
                    receipt_dir = %config.receipt_dir,
                    "Opening file collection store"
                );
                Self::with_backend(Arc::new(FileBackend::new(dir, &config.receipt_dir)))
            }
            None => {
                info!("Opening in-memory collection store");
                Self::with_backend(Arc::new(MemoryBackend::new()))
            }
        }
    }

    /// In-memory store.
    pub fn in_memory() -> Self {
        Self::new(DbConfig::in_memory())
    }

    /// Wraps an existing backend (keep a clone of the `Arc` to inspect it).
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Database {
            backend,
            locks: Arc::new(Default::default()),
        }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Loads a whole collection.
    ///
    /// Never fails: a missing resource is an empty collection, and an
    /// unreadable or corrupt one is logged and treated as empty too.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let bytes = match self.backend.read(collection.name()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(collection = %collection, "Collection not stored yet, loading empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(collection = %collection, error = %e, "Collection unreadable, loading empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                debug!(collection = %collection, count = records.len(), "Collection loaded");
                records
            }
            Err(e) => {
                warn!(collection = %collection, error = %e, "Collection corrupt, loading empty");
                Vec::new()
            }
        }
    }

    /// Replaces a whole collection.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> DbResult<()> {
        let bytes =
            serde_json::to_vec_pretty(records).map_err(|source| DbError::Serialization {
                collection: collection.name().to_string(),
                source,
            })?;
        self.backend.write(collection.name(), &bytes)?;
        debug!(collection = %collection, count = records.len(), "Collection saved");
        Ok(())
    }

    /// Takes the collection's lock. Other `lock`/`modify` callers on the
    /// same collection wait until the guard is dropped.
    pub fn lock(&self, collection: Collection) -> CollectionGuard<'_> {
        let guard = self.locks[collection.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        CollectionGuard {
            db: self,
            collection,
            _guard: guard,
        }
    }

    /// Locked read-modify-write of one collection.
    ///
    /// ```rust
    /// use estore_db::{Collection, Database, Mutation};
    ///
    /// let db = Database::in_memory();
    /// let len = db
    ///     .modify(Collection::Suppliers, |names: &mut Vec<String>| {
    ///         names.push("Acme".into());
    ///         Mutation::Commit(names.len())
    ///     })
    ///     .unwrap();
    /// assert_eq!(len, 1);
    /// ```
    pub fn modify<T, R, F>(&self, collection: Collection, f: F) -> DbResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Mutation<R>,
    {
        let guard = self.lock(collection);
        let mut records: Vec<T> = guard.load();
        match f(&mut records) {
            Mutation::Commit(value) => {
                guard.save(&records)?;
                Ok(value)
            }
            Mutation::Discard(value) => Ok(value),
        }
    }

    /// Writes an exported text document (receipts).
    pub fn export_text(&self, file_name: &str, contents: &str) -> DbResult<String> {
        self.backend.export_text(file_name, contents)
    }

    /// Typed repository over `T`'s collection.
    pub fn repository<T: Record>(&self) -> Repository<T> {
        Repository::new(self.clone())
    }

    /// Returns the item repository.
    pub fn items(&self) -> Repository<Item> {
        self.repository()
    }

    /// Returns the category repository.
    pub fn categories(&self) -> Repository<Category> {
        self.repository()
    }

    /// Returns the supplier repository.
    pub fn suppliers(&self) -> Repository<Supplier> {
        self.repository()
    }

    /// Returns the bill repository.
    pub fn bills(&self) -> Repository<Bill> {
        self.repository()
    }

    /// Returns the user repository.
    pub fn users(&self) -> Repository<Actor> {
        self.repository()
    }
}

// =============================================================================
// Collection Guard
// =============================================================================

/// Exclusive access to one collection for a multi-step read-modify-write.
pub struct CollectionGuard<'a> {
    db: &'a Database,
    collection: Collection,
    _guard: MutexGuard<'a, ()>,
}

impl CollectionGuard<'_> {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        self.db.load(self.collection)
    }

    pub fn save<T: Serialize>(&self, records: &[T]) -> DbResult<()> {
        self.db.save(self.collection, records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
