//! # estore-core: Domain Logic for the EStore Back Office
//!
//! Pure business rules of a single-actor retail back office: inventory
//! records, bills, operator roles, and the session that gates them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     EStore Back Office Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │            Front ends (desktop UI, CLI, scripts)                │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ operation surface                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │     estore-service: Auth / Inventory / Billing services         │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ estore-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │    │
//! │  │   │  types  │ │  money  │ │  bill   │ │ session │ │ receipt  │  │    │
//! │  │   │  Item   │ │  Money  │ │  Bill   │ │ Session │ │  layout  │  │    │
//! │  │   │  Actor  │ │         │ │SaleItem │ │  roles  │ │          │  │    │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘  │    │
//! │  │                                                                 │    │
//! │  │                 NO FILE I/O • NO GLOBAL STATE                   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │         estore-db: Collection Store (JSON files)                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item, Category, Supplier, Actor and Role
//! - [`money`] - Money type with integer arithmetic
//! - [`bill`] - Bill and SaleItem with price snapshots
//! - [`session`] - Session Authority (who is logged in)
//! - [`receipt`] - Fixed-layout receipt text
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Local;
//! use estore_core::{Bill, Money, SaleItem};
//!
//! let mut bill = Bill::new("B00000001", "U00000001", Local::now());
//! bill.add_line(SaleItem {
//!     id: "L00000001".into(),
//!     item_id: "I00000001".into(),
//!     item_name: "Phone Charger".into(),
//!     quantity: 3,
//!     unit_price: Money::from_cents(1500),
//! })
//! .unwrap();
//! assert_eq!(bill.total(), Money::from_cents(4500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod money;
pub mod receipt;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{Bill, SaleItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::render_receipt;
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Section marker a session starts in.
pub const DEFAULT_SECTION: &str = "main";

/// Character width of the receipt banner and rules.
pub const RECEIPT_WIDTH: usize = 33;

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 200;

/// Username length bounds.
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;

/// Highest accepted price, in cents ($1,000,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;
