//! # Repository Module
//!
//! Typed access to each named collection.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service                                                                │
//! │       │                                                                 │
//! │       │  db.items().update_stock("I1a2b3c4d", -3)                       │
//! │       ▼                                                                 │
//! │  Repository<Item>                                                       │
//! │  ├── list / get_by_id          (shared, from Record)                    │
//! │  ├── insert / update / delete  (shared, locked read-modify-write)       │
//! │  └── update_stock, create ...  (item-specific, item.rs)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::load / modify  (whole collection)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - `Repository<Item>` - items, stock changes
//! - `Repository<Category>` - categories
//! - `Repository<Supplier>` - suppliers
//! - `Repository<Bill>` - finalized bills, staged-stock commit
//! - `Repository<Actor>` - operator accounts

pub mod bill;
pub mod category;
pub mod item;
pub mod supplier;
pub mod user;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use crate::store::{Database, Mutation};

pub use bill::{generate_bill_id, generate_line_id, receipt_file_name};
pub use category::generate_category_id;
pub use item::generate_item_id;
pub use supplier::generate_supplier_id;
pub use user::generate_user_id;

// =============================================================================
// Record
// =============================================================================

/// A record type stored in one named collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection holding records of this type.
    const COLLECTION: Collection;

    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

/// Business id: one-letter prefix followed by 8 hex chars of a UUID v4.
///
/// ```rust
/// let id = estore_db::repository::generate_id('I');
/// assert_eq!(id.len(), 9);
/// assert!(id.starts_with('I'));
/// ```
pub fn generate_id(prefix: char) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &uuid[..8])
}

// =============================================================================
// Repository
// =============================================================================

/// Repository over the collection of `T`.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    db: Database,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Repository<T> {
    /// Creates a new repository.
    pub fn new(db: Database) -> Self {
        Repository {
            db,
            _record: PhantomData,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// All records, in stored order. Empty when nothing is stored.
    pub fn list(&self) -> Vec<T> {
        self.db.load(T::COLLECTION)
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    /// Appends a record.
    pub fn insert(&self, record: &T) -> DbResult<()> {
        debug!(entity = T::ENTITY, id = %record.id(), "Inserting record");
        self.db.modify(T::COLLECTION, |records: &mut Vec<T>| {
            records.push(record.clone());
            Mutation::Commit(())
        })
    }

    /// Replaces the stored record with the same id, in place.
    pub fn update(&self, record: &T) -> DbResult<()> {
        debug!(entity = T::ENTITY, id = %record.id(), "Updating record");
        self.db
            .modify(T::COLLECTION, |records: &mut Vec<T>| {
                match records.iter_mut().find(|r| r.id() == record.id()) {
                    Some(slot) => {
                        *slot = record.clone();
                        Mutation::Commit(Ok(()))
                    }
                    None => Mutation::Discard(Err(DbError::not_found(T::ENTITY, record.id()))),
                }
            })?
    }

    /// Removes the record with `id`. Returns whether anything was removed;
    /// the collection is saved only if so.
    pub fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(entity = T::ENTITY, id = %id, "Deleting record");
        self.db.modify(T::COLLECTION, |records: &mut Vec<T>| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() < before {
                Mutation::Commit(true)
            } else {
                Mutation::Discard(false)
            }
        })
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }
}
