//! Supplier repository.

use super::{generate_id, Record, Repository};
use crate::collection::Collection;
use crate::error::DbResult;
use estore_core::Supplier;

impl Record for Supplier {
    const COLLECTION: Collection = Collection::Suppliers;
    const ENTITY: &'static str = "Supplier";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Supplier> {
    /// Stores a new supplier with a fresh id.
    pub fn create(&self, name: impl Into<String>, contact: impl Into<String>) -> DbResult<Supplier> {
        let supplier = Supplier {
            id: generate_supplier_id(),
            name: name.into(),
            contact: contact.into(),
        };
        self.insert(&supplier)?;
        Ok(supplier)
    }
}

/// Helper to generate a new supplier ID (`S` + 8 hex chars).
pub fn generate_supplier_id() -> String {
    generate_id('S')
}

#[cfg(test)]
mod tests {
    use crate::{Collection, Database};
    use estore_core::Supplier;

    #[test]
    fn test_suppliers_persist_in_order() {
        let db = Database::in_memory();
        let a = db.suppliers().create("Acme", "acme@example.com").unwrap();
        let b = db.suppliers().create("Globex", "555-0100").unwrap();

        let stored: Vec<Supplier> = db.load(Collection::Suppliers);
        assert_eq!(stored, vec![a, b]);
    }
}
