//! # Bill Module
//!
//! The sale transaction aggregate and its lines.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   NoBill ──create──► Open ──add/remove line──► Open ──finalize──►       │
//! │     ▲                 │                                  Finalized      │
//! │     │                 │ replaced by a new bill            (persisted,   │
//! │     └─────────────────┘ or session ends (discarded)        immutable)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Snapshot
//! A [`SaleItem`] freezes the item's selling price when the line is added.
//! Later price edits on the item never change an existing line, so
//! `total == Σ line.quantity × line.unit_price` always holds.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Item;

// =============================================================================
// Sale Item
// =============================================================================

/// One line of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    /// Line id (`L` + 8 hex chars), unique within the bill.
    pub id: String,
    /// Item this line sold.
    pub item_id: String,
    /// Item name at time of sale (frozen).
    pub item_name: String,
    pub quantity: u32,
    /// Selling price at time of sale (frozen).
    pub unit_price: Money,
}

impl SaleItem {
    /// Creates a line from the item's current state.
    pub fn from_item(id: impl Into<String>, item: &Item, quantity: u32) -> Self {
        SaleItem {
            id: id.into(),
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            quantity,
            unit_price: item.selling_price,
        }
    }

    /// Quantity × snapshot price.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A sale transaction.
///
/// An open bill lives only in the billing service. Once finalized it is
/// appended to the `bills` collection and never changed again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Business id (`B` + 8 hex chars). Also names the exported receipt.
    pub id: String,
    /// Actor id of the cashier who opened the bill.
    pub cashier_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Local>,
    /// Lines in the order they were added.
    pub items: Vec<SaleItem>,
    /// Always equal to the sum of line subtotals.
    pub total: Money,
}

impl Bill {
    /// Creates an empty bill.
    pub fn new(
        id: impl Into<String>,
        cashier_id: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        Bill {
            id: id.into(),
            cashier_id: cashier_id.into(),
            created_at,
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    /// Appends a line and adds its subtotal to the total.
    ///
    /// Fails, leaving the bill unchanged, if the subtotal or the new total
    /// would overflow.
    pub fn add_line(&mut self, line: SaleItem) -> CoreResult<()> {
        let total = line
            .unit_price
            .checked_multiply_quantity(line.quantity)
            .and_then(|subtotal| self.total.checked_add(subtotal))
            .ok_or_else(|| CoreError::AmountOverflow {
                bill_id: self.id.clone(),
                item_id: line.item_id.clone(),
            })?;
        self.items.push(line);
        self.total = total;
        Ok(())
    }

    /// Removes the line with `line_id` and recomputes the total.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<SaleItem> {
        let pos = self
            .items
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        let line = self.items.remove(pos);
        self.recalculate_total();
        Ok(line)
    }

    pub fn find_line(&self, line_id: &str) -> Option<&SaleItem> {
        self.items.iter().find(|l| l.id == line_id)
    }

    pub fn recalculate_total(&mut self) {
        self.total = self.items.iter().map(SaleItem::subtotal).sum();
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Calendar day of the bill in local time.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Net stock change per item implied by this bill's lines.
    ///
    /// One entry per distinct item, in order of first appearance. Deltas are
    /// negative (units leave the shelf).
    pub fn stock_deltas(&self) -> Vec<(String, i64)> {
        let mut deltas: Vec<(String, i64)> = Vec::new();
        for line in &self.items {
            let qty = i64::from(line.quantity);
            match deltas.iter_mut().find(|(id, _)| *id == line.item_id) {
                Some((_, delta)) => *delta -= qty,
                None => deltas.push((line.item_id.clone(), -qty)),
            }
        }
        deltas
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            category_id: "C00000001".to_string(),
            supplier_id: "S00000001".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            purchase_price: Money::from_cents(100),
            selling_price: Money::from_cents(price),
            stock: 10,
        }
    }

    fn bill() -> Bill {
        Bill::new("B00000001", "U00000001", Local::now())
    }

    #[test]
    fn test_new_bill_is_empty() {
        let b = bill();
        assert!(b.is_empty());
        assert_eq!(b.total(), Money::zero());
    }

    #[test]
    fn test_total_tracks_lines() {
        let mut b = bill();
        b.add_line(SaleItem::from_item("L1", &item("I1", 1500), 3)).unwrap();
        assert_eq!(b.total(), Money::from_cents(4500));

        b.add_line(SaleItem::from_item("L2", &item("I2", 299), 2)).unwrap();
        assert_eq!(b.total(), Money::from_cents(5098));

        let removed = b.remove_line("L1").unwrap();
        assert_eq!(removed.quantity, 3);
        assert_eq!(b.total(), Money::from_cents(598));
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn test_price_is_frozen_at_add_time() {
        let mut it = item("I1", 1500);
        let mut b = bill();
        b.add_line(SaleItem::from_item("L1", &it, 1)).unwrap();

        it.selling_price = Money::from_cents(9999);
        b.recalculate_total();
        assert_eq!(b.total(), Money::from_cents(1500));
        assert_eq!(b.items[0].unit_price, Money::from_cents(1500));
    }

    #[test]
    fn test_remove_unknown_line_fails() {
        let mut b = bill();
        b.add_line(SaleItem::from_item("L1", &item("I1", 100), 1)).unwrap();
        assert_eq!(
            b.remove_line("L9"),
            Err(CoreError::LineNotFound("L9".to_string()))
        );
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn test_overflowing_line_is_rejected() {
        let mut b = bill();
        b.add_line(SaleItem::from_item("L1", &item("I1", 100), 1)).unwrap();

        let pricey = item("I2", 100_000_000_000_000_000);
        assert!(matches!(
            b.add_line(SaleItem::from_item("L2", &pricey, 100)),
            Err(CoreError::AmountOverflow { .. })
        ));

        let max = item("I3", i64::MAX);
        assert!(matches!(
            b.add_line(SaleItem::from_item("L3", &max, 1)),
            Err(CoreError::AmountOverflow { .. })
        ));

        assert_eq!(b.line_count(), 1);
        assert_eq!(b.total(), Money::from_cents(100));
    }

    #[test]
    fn test_stock_deltas_aggregate_per_item() {
        let mut b = bill();
        b.add_line(SaleItem::from_item("L1", &item("I1", 100), 2)).unwrap();
        b.add_line(SaleItem::from_item("L2", &item("I2", 100), 1)).unwrap();
        b.add_line(SaleItem::from_item("L3", &item("I1", 100), 3)).unwrap();

        assert_eq!(
            b.stock_deltas(),
            vec![("I1".to_string(), -5), ("I2".to_string(), -1)]
        );
    }
}
