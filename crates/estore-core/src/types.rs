//! # Domain Types
//!
//! Inventory and operator types shared by every layer of the back office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      Item       │   │    Category     │   │    Supplier     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id  (I…)       │──►│  id  (C…)       │   │  id  (S…)       │        │
//! │  │  category_id    │   │  min_stock_level│   │  contact        │        │
//! │  │  supplier_id ───┼──────────────────────►│                 │        │
//! │  │  stock (u32)    │   │  sector         │   └─────────────────┘        │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────────────────────┐         │
//! │  │     Actor       │   │  Role                                │         │
//! │  │  ─────────────  │   │  ──────────────────────────────────  │         │
//! │  │  id  (U…)       │   │  Cashier { sector }                  │         │
//! │  │  username       │──►│  Manager { managed_sectors }         │         │
//! │  │  password_hash  │   │  Administrator                       │         │
//! │  └─────────────────┘   └──────────────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records reference each other by id only. The persisted form never nests
//! an Item inside its Category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A stocked item.
///
/// `stock` is unsigned, and [`Item::update_stock`] is the only way the
/// service layer changes it, so a persisted item never holds a negative
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Business id (`I` + 8 hex chars).
    pub id: String,

    /// Display name, copied onto bill lines when sold.
    pub name: String,

    /// Category this item belongs to (drives the low-stock threshold).
    pub category_id: String,

    /// Supplier the item was purchased from.
    pub supplier_id: String,

    #[ts(as = "String")]
    pub purchase_date: NaiveDate,

    pub purchase_price: Money,

    /// Current shelf price. Bill lines snapshot this at add time.
    pub selling_price: Money,

    /// Units on hand.
    pub stock: u32,
}

impl Item {
    /// Applies a signed stock change.
    ///
    /// Returns the new quantity. On failure the stock is left unchanged.
    ///
    /// ```rust
    /// # use estore_core::{Item, Money};
    /// # use chrono::NaiveDate;
    /// let mut item = Item {
    ///     id: "I00000001".into(),
    ///     name: "USB Cable".into(),
    ///     category_id: "C00000001".into(),
    ///     supplier_id: "S00000001".into(),
    ///     purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     purchase_price: Money::from_cents(300),
    ///     selling_price: Money::from_cents(500),
    ///     stock: 2,
    /// };
    /// assert_eq!(item.update_stock(-2).unwrap(), 0);
    /// assert!(item.update_stock(-1).is_err());
    /// assert_eq!(item.stock, 0);
    /// ```
    pub fn update_stock(&mut self, delta: i64) -> CoreResult<u32> {
        let next = i64::from(self.stock)
            .checked_add(delta)
            .ok_or_else(|| CoreError::StockOverflow {
                item_id: self.id.clone(),
            })?;
        if next < 0 {
            return Err(CoreError::InsufficientStock {
                item_id: self.id.clone(),
                available: self.stock,
                requested: delta.unsigned_abs(),
            });
        }
        let next = u32::try_from(next).map_err(|_| CoreError::StockOverflow {
            item_id: self.id.clone(),
        })?;
        self.stock = next;
        Ok(next)
    }

    /// Whether `quantity` units can be taken from the shelf right now.
    #[inline]
    pub fn check_availability(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Input for creating an item. The id and purchase date are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub category_id: String,
    pub supplier_id: String,
    pub purchase_price: Money,
    pub selling_price: Money,
    pub quantity: u32,
}

// =============================================================================
// Category
// =============================================================================

/// A grouping of items with a shared reorder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Business id (`C` + 8 hex chars).
    pub id: String,
    pub name: String,
    /// Items at or below this quantity raise a low-stock alert.
    pub min_stock_level: u32,
    /// Store sector (e.g. "Phones"), matched against cashier/manager sectors.
    pub sector: String,
}

impl Category {
    /// Low-stock rule. The boundary is inclusive: stock equal to the
    /// minimum level already alerts.
    #[inline]
    pub fn is_low(&self, item: &Item) -> bool {
        item.stock <= self.min_stock_level
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    /// Business id (`S` + 8 hex chars).
    pub id: String,
    pub name: String,
    /// Free-form contact line (phone, email or address).
    pub contact: String,
}

// =============================================================================
// Role
// =============================================================================

/// The capability set an actor carries, with role-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// Sells from one sector of the store.
    Cashier { sector: String },
    /// Maintains inventory for the sectors listed.
    Manager { managed_sectors: Vec<String> },
    /// Manages operator accounts.
    Administrator,
}

impl Role {
    /// The payload-free tag of this role.
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Cashier { .. } => RoleKind::Cashier,
            Role::Manager { .. } => RoleKind::Manager,
            Role::Administrator => RoleKind::Administrator,
        }
    }
}

/// Role tag without payload, used in authorization checks and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Cashier,
    Manager,
    Administrator,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleKind::Cashier => "Cashier",
            RoleKind::Manager => "Manager",
            RoleKind::Administrator => "Administrator",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Actor
// =============================================================================

/// An operator account.
///
/// `password_hash` is an Argon2 PHC string produced by the service layer;
/// this crate never sees a plain password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Actor {
    /// Business id (`U` + 8 hex chars).
    pub id: String,
    pub username: String,
    #[ts(skip)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Inactive accounts cannot log in.
    pub active: bool,
    pub role: Role,
}

impl Actor {
    #[inline]
    pub fn role_kind(&self) -> RoleKind {
        self.role.kind()
    }

    /// The sector a cashier sells from, if this actor is a cashier.
    pub fn sector(&self) -> Option<&str> {
        match &self.role {
            Role::Cashier { sector } => Some(sector),
            _ => None,
        }
    }

    /// Logout notification. Emits an event and touches no storage.
    pub fn on_logout(&self) {
        info!(
            actor_id = %self.id,
            role = %self.role_kind(),
            "{} logged out: {}",
            self.role_kind(),
            self.username
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: u32) -> Item {
        Item {
            id: "I00000001".to_string(),
            name: "Phone Charger".to_string(),
            category_id: "C00000001".to_string(),
            supplier_id: "S00000001".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            purchase_price: Money::from_cents(900),
            selling_price: Money::from_cents(1500),
            stock,
        }
    }

    #[test]
    fn test_update_stock_succeeds_iff_result_non_negative() {
        for (stock, delta) in [(10u32, -10i64), (10, -11), (0, 0), (0, -1), (3, 7)] {
            let mut it = item(stock);
            let result = it.update_stock(delta);
            if i64::from(stock) + delta >= 0 {
                assert_eq!(result.unwrap(), (i64::from(stock) + delta) as u32);
            } else {
                assert!(matches!(result, Err(CoreError::InsufficientStock { .. })));
                assert_eq!(it.stock, stock);
            }
        }
    }

    #[test]
    fn test_update_stock_overflow_leaves_stock_unchanged() {
        let mut it = item(u32::MAX);
        assert!(matches!(
            it.update_stock(1),
            Err(CoreError::StockOverflow { .. })
        ));
        assert_eq!(it.stock, u32::MAX);
    }

    #[test]
    fn test_update_stock_extreme_deltas() {
        let mut it = item(5);
        assert!(matches!(
            it.update_stock(i64::MAX),
            Err(CoreError::StockOverflow { .. })
        ));
        assert_eq!(it.stock, 5);

        assert!(matches!(
            it.update_stock(i64::MIN),
            Err(CoreError::InsufficientStock { requested, .. }) if requested == i64::MIN.unsigned_abs()
        ));
        assert_eq!(it.stock, 5);

        let mut full = item(0);
        assert_eq!(full.update_stock(i64::from(u32::MAX)).unwrap(), u32::MAX);
    }

    #[test]
    fn test_check_availability() {
        let it = item(10);
        assert!(it.check_availability(10));
        assert!(!it.check_availability(11));
        assert!(!item(0).is_available());
    }

    #[test]
    fn test_low_stock_boundary_is_inclusive() {
        let category = Category {
            id: "C00000001".to_string(),
            name: "Chargers".to_string(),
            min_stock_level: 5,
            sector: "Accessories".to_string(),
        };
        assert!(category.is_low(&item(3)));
        assert!(category.is_low(&item(5)));
        assert!(!category.is_low(&item(6)));
    }

    #[test]
    fn test_role_kind_and_sector() {
        let actor = Actor {
            id: "U00000001".to_string(),
            username: "cash1".to_string(),
            password_hash: String::new(),
            name: "Cash One".to_string(),
            email: "cash1@store.test".to_string(),
            phone: "555-0101".to_string(),
            active: true,
            role: Role::Cashier {
                sector: "Phones".to_string(),
            },
        };
        assert_eq!(actor.role_kind(), RoleKind::Cashier);
        assert_eq!(actor.sector(), Some("Phones"));
        assert_eq!(RoleKind::Administrator.to_string(), "Administrator");
    }

    #[test]
    fn test_role_serializes_with_kind_tag() {
        let json = serde_json::to_value(Role::Manager {
            managed_sectors: vec!["Phones".to_string()],
        })
        .unwrap();
        assert_eq!(json["kind"], "manager");
        assert_eq!(json["managed_sectors"][0], "Phones");

        let admin: Role = serde_json::from_str(r#"{"kind":"administrator"}"#).unwrap();
        assert_eq!(admin, Role::Administrator);
    }
}
