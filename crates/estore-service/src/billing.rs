//! # Billing Service
//!
//! Bill lifecycle for one billing session: open a bill, add and remove
//! lines, finalize.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            create_new_bill (cashier only, else hard error)              │
//! │   NoBill ─────────────────────────────────────────► Open                │
//! │     ▲                                                │  ▲               │
//! │     │                                   add / remove │  │               │
//! │     │                                                ▼  │               │
//! │     │        finalize_bill ok                       Open                │
//! │     └────────────────────────────────────────────────┘                  │
//! │                                                                         │
//! │   finalize_bill failed ──► stays Open, nothing persisted                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Handling
//! ```text
//! add_item_to_bill(&mut item, 3)   item.stock 10 → 7   (caller's copy only)
//! remove_item_from_bill(line, ..)  item.stock 7 → 10   (caller's copy only)
//! finalize_bill()                  stored stock −= Σ line quantities,
//!                                  bill appended, receipt exported
//! ```
//! The stored item collection only changes at finalize, in the same step
//! that records the bill.

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::error::{BillingError, ServiceError, ServiceResult};
use crate::guard::report;
use estore_core::validation::validate_quantity;
use estore_core::{Bill, CoreError, Item, Money, SaleItem, Session};
use estore_db::repository::{generate_bill_id, generate_line_id};
use estore_db::{Database, DbError};

/// Holds the single open bill of a billing session.
#[derive(Debug, Clone)]
pub struct BillingService {
    db: Database,
    store_name: String,
    current: Option<Bill>,
}

impl BillingService {
    pub fn new(db: Database, store_name: impl Into<String>) -> Self {
        BillingService {
            db,
            store_name: store_name.into(),
            current: None,
        }
    }

    /// Opens a new bill for the logged-in cashier, discarding any bill that
    /// was still open.
    ///
    /// Any other session is a hard failure: no bill is created.
    pub fn create_new_bill(&mut self, session: &Session) -> Result<Bill, BillingError> {
        let cashier = match session.current_actor() {
            Some(actor) if session.is_cashier() => actor,
            _ => return Err(BillingError::NotCashier(session.role())),
        };

        if let Some(old) = self.current.take() {
            debug!(bill_id = %old.id, lines = old.line_count(), "Discarding open bill");
        }

        let bill = Bill::new(generate_bill_id(), cashier.id.clone(), Local::now());
        info!(bill_id = %bill.id, cashier_id = %bill.cashier_id, "Bill opened");
        self.current = Some(bill.clone());
        Ok(bill)
    }

    /// The open bill, if any.
    pub fn current_bill(&self) -> Option<&Bill> {
        self.current.as_ref()
    }

    /// Drops the open bill without persisting anything.
    pub fn discard_bill(&mut self) -> Option<Bill> {
        let bill = self.current.take();
        if let Some(b) = &bill {
            info!(bill_id = %b.id, "Open bill discarded");
        }
        bill
    }

    /// Adds `quantity` units of `item` to the open bill.
    ///
    /// On success the line snapshots the item's selling price and `item`'s
    /// stock is decremented. On failure neither the bill nor `item` changes.
    pub fn add_item_to_bill(&mut self, item: &mut Item, quantity: u32) -> bool {
        report("add_item_to_bill", self.try_add_item(item, quantity))
    }

    fn try_add_item(&mut self, item: &mut Item, quantity: u32) -> ServiceResult<()> {
        let bill = self.current.as_mut().ok_or(ServiceError::NoOpenBill)?;
        validate_quantity(quantity)?;
        if !item.check_availability(quantity) {
            return Err(ServiceError::InsufficientStock {
                item_id: item.id.clone(),
                available: item.stock,
                requested: u64::from(quantity),
            });
        }

        let line = SaleItem::from_item(generate_line_id(), item, quantity);
        let line_id = line.id.clone();
        bill.add_line(line)?;
        if let Err(e) = item.update_stock(-i64::from(quantity)) {
            bill.remove_line(&line_id)?;
            return Err(e.into());
        }
        debug!(bill_id = %bill.id, line_id = %line_id, item_id = %item.id, quantity, "Line added");
        Ok(())
    }

    /// Removes line `line_id` from the open bill and gives its units back
    /// to `item`, which must be the item the line sold.
    pub fn remove_item_from_bill(&mut self, line_id: &str, item: &mut Item) -> bool {
        report("remove_item_from_bill", self.try_remove_item(line_id, item))
    }

    fn try_remove_item(&mut self, line_id: &str, item: &mut Item) -> ServiceResult<()> {
        let bill = self.current.as_mut().ok_or(ServiceError::NoOpenBill)?;
        let line = bill
            .find_line(line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        if line.item_id != item.id {
            return Err(CoreError::LineItemMismatch {
                line_id: line_id.to_string(),
                expected: line.item_id.clone(),
                actual: item.id.clone(),
            }
            .into());
        }

        item.update_stock(i64::from(line.quantity))?;
        bill.remove_line(line_id)?;
        debug!(bill_id = %bill.id, line_id = %line_id, "Line removed");
        Ok(())
    }

    /// Total of the open bill, zero if none is open.
    pub fn get_bill_total(&self) -> Money {
        self.current.as_ref().map_or(Money::zero(), Bill::total)
    }

    /// Durably records the open bill and its stock effect, exports the
    /// receipt, and clears the open-bill slot.
    ///
    /// Fails with no side effects when no bill is open, the bill is empty,
    /// or the store rejects the commit; the bill then stays open. If the
    /// bill was recorded but its stock change could not be, the bill is
    /// closed anyway and the failure is logged for reconciliation.
    pub fn finalize_bill(&mut self) -> bool {
        report("finalize_bill", self.try_finalize())
    }

    fn try_finalize(&mut self) -> ServiceResult<()> {
        let bill = self.current.as_ref().ok_or(ServiceError::NoOpenBill)?;
        if bill.is_empty() {
            return Err(ServiceError::EmptyBill(bill.id.clone()));
        }

        let bills = self.db.bills();
        if let Err(e) = bills.commit(bill) {
            if let DbError::StockNotApplied { .. } = e {
                // The bill is on record and cannot be committed again.
                error!(bill_id = %bill.id, "Open bill closed without its stock change");
                self.current = None;
            }
            return Err(e.into());
        }
        if let Err(e) = bills.export_receipt(bill, &self.store_name) {
            warn!(bill_id = %bill.id, error = %e, "Receipt export failed");
        }

        info!(bill_id = %bill.id, total = %bill.total(), "Bill finalized");
        self.current = None;
        Ok(())
    }

    /// Today's finalized bills of the logged-in actor.
    pub fn get_daily_bills(&self, session: &Session) -> Vec<Bill> {
        match session.current_actor() {
            Some(actor) => self
                .db
                .bills()
                .list_for_cashier_on(&actor.id, Local::now().date_naive()),
            None => Vec::new(),
        }
    }

    /// Sum of [`get_daily_bills`](Self::get_daily_bills) totals.
    pub fn get_total_sales(&self, session: &Session) -> Money {
        self.get_daily_bills(session).iter().map(Bill::total).sum()
    }
}
