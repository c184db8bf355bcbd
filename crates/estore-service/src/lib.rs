//! # estore-service: Operation Surface
//!
//! The services front ends call: authentication, inventory and billing.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppConfig::load(None)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config.db_config())                                      │
//! │       │                                                                 │
//! │       ├──► AuthService::new(db.clone(), &config)                        │
//! │       ├──► InventoryService::new(db.clone())                            │
//! │       └──► BillingService::new(db, &config.store_name)                  │
//! │                                                                         │
//! │  Session::new()  ── passed to every gated call ──►  services            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use estore_core::{Role, Session};
//! use estore_db::Database;
//! use estore_service::{AppConfig, AuthService, BillingService, NewUser};
//!
//! let config = AppConfig::default();
//! let db = Database::in_memory();
//! let auth = AuthService::new(db.clone(), &config);
//! let mut billing = BillingService::new(db, &config.store_name);
//!
//! let mut session = Session::new();
//! auth.register_user(&session, NewUser {
//!     username: "cash1".into(),
//!     password: "secret".into(),
//!     name: "Cash One".into(),
//!     email: "cash1@store.test".into(),
//!     phone: "555-0101".into(),
//!     role: Role::Cashier { sector: "Phones".into() },
//! });
//! assert!(auth.login(&mut session, "cash1", "secret"));
//! assert!(billing.create_new_bill(&session).is_ok());
//! ```

pub mod auth;
pub mod billing;
pub mod config;
pub mod error;
pub mod inventory;
pub mod password;

mod guard;

pub use auth::{AuthService, NewUser, UserUpdate};
pub use billing::BillingService;
pub use config::AppConfig;
pub use error::{BillingError, ConfigError, ServiceError, ServiceResult};
pub use inventory::InventoryService;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber for binaries.
///
/// `RUST_LOG` overrides the default filter `info,estore=debug`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,estore=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
