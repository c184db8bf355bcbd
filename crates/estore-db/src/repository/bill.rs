//! # Bill Repository
//!
//! Finalized bills and the commit that makes a sale durable.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit(bill)                                                           │
//! │                                                                         │
//! │  1. lock items, load fresh copy                                         │
//! │  2. apply bill.stock_deltas() to the copy   ── unknown / short? ──► Err │
//! │  3. lock bills, append bill, save bills     ── fails? ──────────► Err   │
//! │  4. save items                              ── fails? ──► drop bill,    │
//! │                                                         save bills, Err │
//! │  5. Ok                                                                  │
//! │                                                                         │
//! │  Nothing is persisted unless both collections are saved.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deltas are applied to the stored quantities, not copied from the
//! caller's item values, so stock moved by someone else between "add to
//! bill" and "finalize" is not overwritten.

use chrono::NaiveDate;
use tracing::{error, info};

use super::{generate_id, Record, Repository};
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use estore_core::{render_receipt, Bill, Item};

impl Record for Bill {
    const COLLECTION: Collection = Collection::Bills;
    const ENTITY: &'static str = "Bill";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Bill> {
    /// Bills opened by `cashier_id` on calendar day `date` (local time).
    pub fn list_for_cashier_on(&self, cashier_id: &str, date: NaiveDate) -> Vec<Bill> {
        self.list()
            .into_iter()
            .filter(|b| b.cashier_id == cashier_id && b.date() == date)
            .collect()
    }

    /// Durably records a finalized bill together with its stock effect.
    ///
    /// Items are locked before bills. The bill is saved first; if the item
    /// save then fails the bill is withdrawn again. When that withdrawal
    /// also fails the error is [`DbError::StockNotApplied`].
    pub fn commit(&self, bill: &Bill) -> DbResult<()> {
        let db = self.database();

        let items_guard = db.lock(Collection::Items);
        let mut items: Vec<Item> = items_guard.load();
        for (item_id, delta) in bill.stock_deltas() {
            let item = items
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| DbError::not_found("Item", &item_id))?;
            item.update_stock(delta)?;
        }

        let bills_guard = db.lock(Collection::Bills);
        let mut bills: Vec<Bill> = bills_guard.load();
        if bills.iter().any(|b| b.id == bill.id) {
            return Err(DbError::duplicate("bill id", &bill.id));
        }
        bills.push(bill.clone());
        bills_guard.save(&bills)?;

        if let Err(e) = items_guard.save(&items) {
            bills.pop();
            if let Err(undo) = bills_guard.save(&bills) {
                error!(
                    bill_id = %bill.id,
                    error = %undo,
                    "Could not withdraw bill after item save failed"
                );
                return Err(DbError::StockNotApplied {
                    bill_id: bill.id.clone(),
                    source: Box::new(e),
                });
            }
            return Err(e);
        }

        info!(
            bill_id = %bill.id,
            lines = bill.line_count(),
            total = %bill.total(),
            "Bill committed"
        );
        Ok(())
    }

    /// Renders and exports the receipt for `bill`. Returns its location.
    pub fn export_receipt(&self, bill: &Bill, store_name: &str) -> DbResult<String> {
        let text = render_receipt(bill, store_name);
        let location = self
            .database()
            .export_text(&receipt_file_name(bill), &text)?;
        info!(bill_id = %bill.id, location = %location, "Receipt exported");
        Ok(location)
    }
}

/// Helper to generate a new bill ID (`B` + 8 hex chars).
pub fn generate_bill_id() -> String {
    generate_id('B')
}

/// Helper to generate a new bill line ID (`L` + 8 hex chars).
pub fn generate_line_id() -> String {
    generate_id('L')
}

/// `<bill_id>_<yyyy-mm-dd>.txt`
pub fn receipt_file_name(bill: &Bill) -> String {
    format!("{}_{}.txt", bill.id, bill.date().format("%Y-%m-%d"))
}
