//! # Inventory Service
//!
//! Role-gated maintenance of items, categories and suppliers, plus the
//! ungated reads every front end uses.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(session, new)                                                 │
//! │       │                                                                 │
//! │       ├── session.is_manager()?  no ──► false (logged)                  │
//! │       ├── validate input          bad ──► false (logged)                │
//! │       ▼                                                                 │
//! │  items: lock ─► load ─► push ─► save ─► unlock                          │
//! │       │                                                                 │
//! │       └── save failed? ──► false (logged)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::guard::{report, require_role};
use estore_core::validation::{validate_name, validate_price};
use estore_core::{Actor, Category, Item, NewItem, Role, RoleKind, Session, Supplier};
use estore_db::{Database, Record};

/// Inventory operations over the store.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
}

impl InventoryService {
    pub fn new(db: Database) -> Self {
        InventoryService { db }
    }

    // =========================================================================
    // Manager-gated mutations
    // =========================================================================

    /// Adds an item with a fresh id and today's purchase date.
    pub fn add_item(&self, session: &Session, new: NewItem) -> bool {
        report("add_item", self.try_add_item(session, new))
    }

    fn try_add_item(&self, session: &Session, new: NewItem) -> ServiceResult<Item> {
        require_role(session, RoleKind::Manager)?;
        validate_name("name", &new.name)?;
        validate_price("purchase_price", new.purchase_price)?;
        validate_price("selling_price", new.selling_price)?;

        let item = self.db.items().create(new)?;
        info!(item_id = %item.id, name = %item.name, stock = item.stock, "Item added");
        Ok(item)
    }

    pub fn add_category(
        &self,
        session: &Session,
        name: &str,
        min_stock_level: u32,
        sector: &str,
    ) -> bool {
        report(
            "add_category",
            self.try_add_category(session, name, min_stock_level, sector),
        )
    }

    fn try_add_category(
        &self,
        session: &Session,
        name: &str,
        min_stock_level: u32,
        sector: &str,
    ) -> ServiceResult<Category> {
        require_role(session, RoleKind::Manager)?;
        validate_name("name", name)?;
        validate_name("sector", sector)?;

        let category = self
            .db
            .categories()
            .create(name.trim(), min_stock_level, sector.trim())?;
        info!(category_id = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    pub fn add_supplier(&self, session: &Session, name: &str, contact: &str) -> bool {
        report("add_supplier", self.try_add_supplier(session, name, contact))
    }

    fn try_add_supplier(
        &self,
        session: &Session,
        name: &str,
        contact: &str,
    ) -> ServiceResult<Supplier> {
        require_role(session, RoleKind::Manager)?;
        validate_name("name", name)?;

        let supplier = self.db.suppliers().create(name.trim(), contact.trim())?;
        info!(supplier_id = %supplier.id, name = %supplier.name, "Supplier added");
        Ok(supplier)
    }

    /// Applies a signed stock correction. Fails, saving nothing, if the
    /// result would be negative or the item is unknown.
    ///
    /// Additions are further limited to items whose category sector the
    /// manager manages.
    pub fn update_item_stock(&self, session: &Session, item_id: &str, delta: i64) -> bool {
        report(
            "update_item_stock",
            self.try_update_item_stock(session, item_id, delta),
        )
    }

    fn try_update_item_stock(
        &self,
        session: &Session,
        item_id: &str,
        delta: i64,
    ) -> ServiceResult<u32> {
        let manager = require_role(session, RoleKind::Manager)?;
        if delta > 0 {
            self.require_managed_sector(manager, item_id)?;
        }
        let stock = self.db.items().update_stock(item_id, delta)?;
        info!(item_id = %item_id, delta, stock, "Item stock updated");
        Ok(stock)
    }

    fn require_managed_sector(&self, manager: &Actor, item_id: &str) -> ServiceResult<()> {
        let item = self
            .db
            .items()
            .get_by_id(item_id)
            .ok_or_else(|| ServiceError::not_found(Item::ENTITY, item_id))?;
        let category = self
            .db
            .categories()
            .get_by_id(&item.category_id)
            .ok_or_else(|| ServiceError::not_found(Category::ENTITY, &item.category_id))?;

        match &manager.role {
            Role::Manager { managed_sectors } if managed_sectors.contains(&category.sector) => {
                Ok(())
            }
            _ => Err(ServiceError::SectorNotManaged {
                sector: category.sector,
                username: manager.username.clone(),
            }),
        }
    }

    /// Replaces the stored item with the same id.
    pub fn update_item(&self, session: &Session, item: &Item) -> bool {
        report("update_item", self.try_update_item(session, item))
    }

    fn try_update_item(&self, session: &Session, item: &Item) -> ServiceResult<()> {
        require_role(session, RoleKind::Manager)?;
        validate_name("name", &item.name)?;
        validate_price("purchase_price", item.purchase_price)?;
        validate_price("selling_price", item.selling_price)?;

        self.db.items().update(item)?;
        info!(item_id = %item.id, "Item updated");
        Ok(())
    }

    /// Removes an item. Reports whether one was removed.
    pub fn delete_item(&self, session: &Session, item_id: &str) -> bool {
        report("delete_item", self.try_delete::<Item>(session, item_id))
    }

    /// Removes a category. Items keep their (now dangling) category id and
    /// drop out of low-stock results.
    pub fn delete_category(&self, session: &Session, category_id: &str) -> bool {
        report(
            "delete_category",
            self.try_delete::<Category>(session, category_id),
        )
    }

    pub fn delete_supplier(&self, session: &Session, supplier_id: &str) -> bool {
        report(
            "delete_supplier",
            self.try_delete::<Supplier>(session, supplier_id),
        )
    }

    fn try_delete<T: Record>(&self, session: &Session, id: &str) -> ServiceResult<()> {
        require_role(session, RoleKind::Manager)?;
        if !self.db.repository::<T>().delete(id)? {
            return Err(ServiceError::not_found(T::ENTITY, id));
        }
        info!(entity = T::ENTITY, id = %id, "Record deleted");
        Ok(())
    }

    // =========================================================================
    // Ungated reads
    // =========================================================================

    pub fn get_all_items(&self) -> Vec<Item> {
        self.db.items().list()
    }

    /// Items with stock > 0.
    pub fn get_available_items(&self) -> Vec<Item> {
        self.db.items().list_available()
    }

    pub fn get_all_categories(&self) -> Vec<Category> {
        self.db.categories().list()
    }

    pub fn get_all_suppliers(&self) -> Vec<Supplier> {
        self.db.suppliers().list()
    }

    pub fn find_item(&self, item_id: &str) -> Option<Item> {
        self.db.items().get_by_id(item_id)
    }

    /// Items whose stock is at or below their category's minimum level.
    pub fn check_low_stock(&self) -> Vec<Item> {
        let categories = self.get_all_categories();
        self.db.items().list_low_stock(&categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estore_core::Money;

    fn session(role: Role) -> Session {
        let mut session = Session::new();
        session.start(Actor {
            id: "U1".to_string(),
            username: "op".to_string(),
            password_hash: String::new(),
            name: "Operator".to_string(),
            email: String::new(),
            phone: String::new(),
            active: true,
            role,
        });
        session
    }

    fn manager() -> Session {
        session(Role::Manager {
            managed_sectors: vec!["Mobile".to_string()],
        })
    }

    fn new_item(name: &str, category_id: &str, quantity: u32) -> NewItem {
        NewItem {
            name: name.to_string(),
            category_id: category_id.to_string(),
            supplier_id: "S1".to_string(),
            purchase_price: Money::from_cents(900),
            selling_price: Money::from_cents(1500),
            quantity,
        }
    }

    #[test]
    fn test_mutations_require_manager() {
        let inv = InventoryService::new(Database::in_memory());
        let cashier = session(Role::Cashier {
            sector: "Mobile".to_string(),
        });

        assert!(!inv.add_item(&cashier, new_item("Phone", "C1", 1)));
        assert!(!inv.add_category(&Session::new(), "Phones", 5, "Mobile"));
        assert!(!inv.add_supplier(&session(Role::Administrator), "Acme", "555"));
        assert!(inv.get_all_items().is_empty());
        assert!(inv.get_all_categories().is_empty());
        assert!(inv.get_all_suppliers().is_empty());
    }

    #[test]
    fn test_manager_crud() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();

        assert!(inv.add_category(&mgr, "Phones", 5, "Mobile"));
        assert!(inv.add_supplier(&mgr, "Acme", "acme@example.com"));
        let category_id = inv.get_all_categories()[0].id.clone();
        assert!(inv.add_item(&mgr, new_item("Phone", &category_id, 10)));

        let mut item = inv.get_all_items().remove(0);
        assert!(inv.update_item_stock(&mgr, &item.id, -4));
        assert_eq!(inv.find_item(&item.id).unwrap().stock, 6);
        assert!(!inv.update_item_stock(&mgr, &item.id, -7));
        assert_eq!(inv.find_item(&item.id).unwrap().stock, 6);

        item.name = "Smartphone".to_string();
        item.stock = 6;
        assert!(inv.update_item(&mgr, &item));
        assert_eq!(inv.find_item(&item.id).unwrap().name, "Smartphone");

        assert!(inv.delete_item(&mgr, &item.id));
        assert!(!inv.delete_item(&mgr, &item.id));
        assert!(inv.delete_category(&mgr, &category_id));
        let supplier_id = inv.get_all_suppliers()[0].id.clone();
        assert!(inv.delete_supplier(&mgr, &supplier_id));
        assert!(inv.get_all_suppliers().is_empty());
    }

    #[test]
    fn test_validation_is_soft() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();

        assert!(!inv.add_item(&mgr, new_item("", "C1", 1)));
        let mut negative = new_item("Phone", "C1", 1);
        negative.selling_price = Money::from_cents(-1);
        assert!(!inv.add_item(&mgr, negative));
        assert!(!inv.add_category(&mgr, " ", 5, "Mobile"));
        assert!(inv.get_all_items().is_empty());
    }

    #[test]
    fn test_restock_limited_to_managed_sectors() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();
        inv.add_category(&mgr, "Phones", 5, "Mobile");
        inv.add_category(&mgr, "Laptops", 2, "Computing");
        let categories = inv.get_all_categories();
        inv.add_item(&mgr, new_item("Phone", &categories[0].id, 4));
        inv.add_item(&mgr, new_item("Laptop", &categories[1].id, 4));
        inv.add_item(&mgr, new_item("Orphan", "C-missing", 4));
        let items = inv.get_all_items();

        assert!(inv.update_item_stock(&mgr, &items[0].id, 6));
        assert_eq!(inv.find_item(&items[0].id).unwrap().stock, 10);

        assert!(!inv.update_item_stock(&mgr, &items[1].id, 6));
        assert!(!inv.update_item_stock(&mgr, &items[2].id, 6));
        assert_eq!(inv.find_item(&items[1].id).unwrap().stock, 4);
        assert_eq!(inv.find_item(&items[2].id).unwrap().stock, 4);

        // Corrections downward are not sector-bound.
        assert!(inv.update_item_stock(&mgr, &items[1].id, -1));
        assert_eq!(inv.find_item(&items[1].id).unwrap().stock, 3);
    }

    #[test]
    fn test_extreme_stock_deltas_fail_softly() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();
        inv.add_category(&mgr, "Phones", 5, "Mobile");
        let category_id = inv.get_all_categories()[0].id.clone();
        inv.add_item(&mgr, new_item("Phone", &category_id, 5));
        let id = inv.get_all_items()[0].id.clone();

        assert!(!inv.update_item_stock(&mgr, &id, i64::MAX));
        assert!(!inv.update_item_stock(&mgr, &id, i64::MIN));
        assert_eq!(inv.find_item(&id).unwrap().stock, 5);
    }

    #[test]
    fn test_update_unknown_item_fails() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();
        inv.add_item(&mgr, new_item("Phone", "C1", 1));
        let mut ghost = inv.get_all_items().remove(0);
        ghost.id = "I-ghost".to_string();

        assert!(!inv.update_item(&mgr, &ghost));
        assert!(!inv.update_item_stock(&mgr, "I-ghost", 1));
    }

    #[test]
    fn test_available_items() {
        let inv = InventoryService::new(Database::in_memory());
        let mgr = manager();
        inv.add_item(&mgr, new_item("In stock", "C1", 2));
        inv.add_item(&mgr, new_item("Sold out", "C1", 0));

        let names: Vec<String> = inv
            .get_available_items()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["In stock".to_string()]);
    }
}
