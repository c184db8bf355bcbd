//! # Item Repository
//!
//! Item-specific operations on top of [`Repository`]: creation from a
//! [`NewItem`], stock changes, and the available/low-stock reads.

use chrono::Local;
use tracing::debug;

use super::{generate_id, Record, Repository};
use crate::collection::Collection;
use crate::error::{DbError, DbResult};
use crate::store::Mutation;
use estore_core::{Category, Item, NewItem};

impl Record for Item {
    const COLLECTION: Collection = Collection::Items;
    const ENTITY: &'static str = "Item";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Item> {
    /// Stores a new item with a fresh id and today's purchase date.
    pub fn create(&self, new: NewItem) -> DbResult<Item> {
        let item = Item {
            id: generate_item_id(),
            name: new.name,
            category_id: new.category_id,
            supplier_id: new.supplier_id,
            purchase_date: Local::now().date_naive(),
            purchase_price: new.purchase_price,
            selling_price: new.selling_price,
            stock: new.quantity,
        };
        self.insert(&item)?;
        Ok(item)
    }

    /// Applies a signed stock change to one stored item.
    ///
    /// Saves only if the change is accepted; returns the new quantity.
    pub fn update_stock(&self, id: &str, delta: i64) -> DbResult<u32> {
        debug!(item_id = %id, delta = delta, "Updating stock");
        self.database()
            .modify(Collection::Items, |items: &mut Vec<Item>| {
                let Some(item) = items.iter_mut().find(|i| i.id == id) else {
                    return Mutation::Discard(Err(DbError::not_found("Item", id)));
                };
                match item.update_stock(delta) {
                    Ok(stock) => Mutation::Commit(Ok(stock)),
                    Err(e) => Mutation::Discard(Err(e.into())),
                }
            })?
    }

    /// Items with at least one unit on hand.
    pub fn list_available(&self) -> Vec<Item> {
        self.list().into_iter().filter(Item::is_available).collect()
    }

    /// Items at or below their category's minimum level.
    ///
    /// Items whose category is not stored are skipped.
    pub fn list_low_stock(&self, categories: &[Category]) -> Vec<Item> {
        self.list()
            .into_iter()
            .filter(|item| {
                categories
                    .iter()
                    .find(|c| c.id == item.category_id)
                    .is_some_and(|c| c.is_low(item))
            })
            .collect()
    }
}

/// Helper to generate a new item ID (`I` + 8 hex chars).
pub fn generate_item_id() -> String {
    generate_id('I')
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use estore_core::{Category, CoreError, Money, NewItem};

    fn new_item(name: &str, category_id: &str, quantity: u32) -> NewItem {
        NewItem {
            name: name.to_string(),
            category_id: category_id.to_string(),
            supplier_id: "S00000001".to_string(),
            purchase_price: Money::from_cents(900),
            selling_price: Money::from_cents(1500),
            quantity,
        }
    }

    fn category(id: &str, min: u32) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            min_stock_level: min,
            sector: "Phones".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_id() {
        let db = Database::in_memory();
        let item = db.items().create(new_item("Charger", "C1", 10)).unwrap();
        assert!(item.id.starts_with('I'));
        assert_eq!(db.items().get_by_id(&item.id), Some(item));
    }

    #[test]
    fn test_update_stock_rejects_negative_result() {
        let db = Database::in_memory();
        let item = db.items().create(new_item("Charger", "C1", 2)).unwrap();

        assert_eq!(db.items().update_stock(&item.id, -2).unwrap(), 0);
        assert!(matches!(
            db.items().update_stock(&item.id, -1),
            Err(DbError::Rule(CoreError::InsufficientStock { .. }))
        ));
        assert_eq!(db.items().get_by_id(&item.id).unwrap().stock, 0);
        assert!(matches!(
            db.items().update_stock("I-missing", 1),
            Err(DbError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_and_delete() {
        let db = Database::in_memory();
        let repo = db.items();
        let mut item = repo.create(new_item("Charger", "C1", 2)).unwrap();

        item.selling_price = Money::from_cents(1700);
        repo.update(&item).unwrap();
        assert_eq!(
            repo.get_by_id(&item.id).unwrap().selling_price,
            Money::from_cents(1700)
        );

        assert!(repo.delete(&item.id).unwrap());
        assert!(!repo.delete(&item.id).unwrap());
        assert!(matches!(repo.update(&item), Err(DbError::NotFound { .. })));
    }

    #[test]
    fn test_available_and_low_stock() {
        let db = Database::in_memory();
        let repo = db.items();
        let empty = repo.create(new_item("Empty", "C1", 0)).unwrap();
        let low = repo.create(new_item("Low", "C1", 5)).unwrap();
        let fine = repo.create(new_item("Fine", "C1", 6)).unwrap();
        let orphan = repo.create(new_item("Orphan", "C-gone", 0)).unwrap();

        let available: Vec<String> = repo.list_available().into_iter().map(|i| i.id).collect();
        assert_eq!(available, vec![low.id.clone(), fine.id.clone()]);

        let low_ids: Vec<String> = repo
            .list_low_stock(&[category("C1", 5)])
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(low_ids, vec![empty.id, low.id]);
        assert!(!low_ids.contains(&orphan.id));
    }
}
