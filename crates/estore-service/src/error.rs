//! # Service Error Types
//!
//! Errors of the operation surface consumed by front ends.
//!
//! ## Soft vs Hard Failures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Handling in the Services                       │
//! │                                                                         │
//! │  Service helper (ServiceResult<T>)                                      │
//! │         │                                                               │
//! │         ├── Unauthorized      wrong role for an inventory/user change   │
//! │         ├── InsufficientStock / NotFound / EmptyBill / Validation       │
//! │         ├── Persistence       write failed                              │
//! │         ▼                                                               │
//! │  Public operation  ── logs the reason ──►  false / empty Vec            │
//! │                                                                         │
//! │  create_new_bill  ── not a cashier ──►  Err(BillingError::NotCashier)   │
//! │                       (the only hard failure)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estore_core::{CoreError, RoleKind, ValidationError};
use estore_db::DbError;
use thiserror::Error;

// =============================================================================
// Service Error
// =============================================================================

/// Reasons a service operation was rejected.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No actor is bound to the session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The bound actor lacks the role the operation requires.
    #[error("{required} role required (current: {})", role_label(.actual))]
    Unauthorized {
        required: RoleKind,
        actual: Option<RoleKind>,
    },

    /// A manager tried to restock an item outside the sectors it manages.
    #[error("Sector '{sector}' is not managed by {username}")]
    SectorNotManaged { sector: String, username: String },

    /// Username or password did not match, or the account is inactive.
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Not enough units on hand.
    #[error("Insufficient stock for {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: u32,
        requested: u64,
    },

    /// A bill operation was attempted with no open bill.
    #[error("No open bill")]
    NoOpenBill,

    /// Finalize was attempted on a bill without lines.
    #[error("Bill {0} has no items")]
    EmptyBill(String),

    /// Input rejected before touching storage.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Business rule rejected the change.
    #[error("{0}")]
    Rule(CoreError),

    /// A write to the store failed.
    #[error("Persistence error: {0}")]
    Persistence(DbError),

    /// A sector was given for an account that has none.
    #[error("{0} is not a cashier and has no sector")]
    NotACashier(String),

    /// An administrator tried to delete or deactivate its own account.
    #[error("Cannot {0} the logged-in account")]
    SelfAction(&'static str),

    /// Password hashing failed.
    #[error("Credential error: {0}")]
    Credential(String),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Domain errors: stock shortages keep their own variant so callers can
/// tell them apart from other rule violations.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                item_id,
                available,
                requested,
            } => ServiceError::InsufficientStock {
                item_id,
                available,
                requested,
            },
            CoreError::Validation(v) => ServiceError::Validation(v),
            other => ServiceError::Rule(other),
        }
    }
}

/// Store errors.
///
/// ## Error Mapping
/// ```text
/// DbError::NotFound    → ServiceError::NotFound
/// DbError::Duplicate   → ServiceError::Validation(Duplicate)
/// DbError::Rule        → From<CoreError>
/// Other                → ServiceError::Persistence
/// ```
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::Duplicate { field, value } => {
                ServiceError::Validation(ValidationError::Duplicate { field, value })
            }
            DbError::Rule(core) => core.into(),
            other => ServiceError::Persistence(other),
        }
    }
}

fn role_label(role: &Option<RoleKind>) -> String {
    role.map_or_else(|| "none".to_string(), |r| r.to_string())
}

/// Result type for service helpers.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Billing Error
// =============================================================================

/// Hard failure of bill creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Only a cashier session may open a bill.
    #[error("Only a cashier can create a bill (current role: {})", role_label(.0))]
    NotCashier(Option<RoleKind>),
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
