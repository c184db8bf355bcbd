//! # Store Error Types
//!
//! Error types for Collection Store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / CoreError                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds the collection or record involved         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (estore-service) ← Logged, reported as `false`            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never produce a `DbError` at the public surface: `Database::load`
//! degrades to an empty collection. Only writes and lookups fail.

use estore_core::CoreError;
use thiserror::Error;

/// Collection Store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Record not found in its collection.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id that isn't stored
    /// - A bill line refers to an item that has since been deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A unique field already holds this value.
    ///
    /// ## When This Occurs
    /// - Registering a username that is taken
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// File system failure while writing a collection or receipt.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be encoded.
    #[error("Serialization failed for {collection}: {source}")]
    Serialization {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// Backend-specific failure (e.g. an injected test fault).
    #[error("Backend error: {0}")]
    Backend(String),

    /// A bill was recorded, but neither its stock change nor its
    /// withdrawal could be saved.
    #[error("Bill {bill_id} recorded without its stock change: {source}")]
    StockNotApplied {
        bill_id: String,
        #[source]
        source: Box<DbError>,
    },

    /// A domain rule rejected the change (e.g. stock would go negative).
    #[error(transparent)]
    Rule(#[from] CoreError),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_format() {
        assert_eq!(
            DbError::not_found("Item", "I00000001").to_string(),
            "Item not found: I00000001"
        );
        assert_eq!(
            DbError::duplicate("username", "alice").to_string(),
            "Duplicate username: 'alice' already exists"
        );
    }

    #[test]
    fn test_rule_is_transparent() {
        let err: DbError = CoreError::LineNotFound("L1".to_string()).into();
        assert_eq!(err.to_string(), "Bill line not found: L1");
    }
}
