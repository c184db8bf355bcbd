//! # estore-db: Collection Store for the EStore Back Office
//!
//! Durable storage of named, ordered, homogeneous collections. Every
//! operation acts on a whole collection.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        estore-db Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Database (store.rs)                          │    │
//! │  │   load / save / modify / lock, per-collection mutexes           │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    Repositories                                 │    │
//! │  │  ┌────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ ┌────────┐     │    │
//! │  │  │ items  │ │categories│ │suppliers │ │ bills  │ │ users  │     │    │
//! │  │  └────────┘ └──────────┘ └──────────┘ └────────┘ └────────┘     │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │   Backend: FileBackend (<dir>/<name>.json) | MemoryBackend      │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estore_db::{Collection, Database};
//! use estore_core::Item;
//!
//! let db = Database::in_memory();
//! // Nothing stored yet: loads as empty, never as an error.
//! let items: Vec<Item> = db.load(Collection::Items);
//! assert!(items.is_empty());
//! ```

pub mod backend;
pub mod collection;
pub mod error;
pub mod repository;
pub mod store;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use collection::Collection;
pub use error::{DbError, DbResult};
pub use repository::{Record, Repository};
pub use store::{CollectionGuard, Database, DbConfig, Mutation, DEFAULT_RECEIPT_DIR};
