//! Category repository.

use super::{generate_id, Record, Repository};
use crate::collection::Collection;
use crate::error::DbResult;
use estore_core::Category;

impl Record for Category {
    const COLLECTION: Collection = Collection::Categories;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Category> {
    /// Stores a new category with a fresh id.
    pub fn create(
        &self,
        name: impl Into<String>,
        min_stock_level: u32,
        sector: impl Into<String>,
    ) -> DbResult<Category> {
        let category = Category {
            id: generate_category_id(),
            name: name.into(),
            min_stock_level,
            sector: sector.into(),
        };
        self.insert(&category)?;
        Ok(category)
    }
}

/// Helper to generate a new category ID (`C` + 8 hex chars).
pub fn generate_category_id() -> String {
    generate_id('C')
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn test_create_list_delete() {
        let db = Database::in_memory();
        let repo = db.categories();
        let phones = repo.create("Phones", 5, "Mobile").unwrap();
        repo.create("Cables", 20, "Accessories").unwrap();

        assert!(phones.id.starts_with('C'));
        assert_eq!(repo.count(), 2);
        assert_eq!(repo.get_by_id(&phones.id), Some(phones.clone()));

        assert!(repo.delete(&phones.id).unwrap());
        assert_eq!(repo.count(), 1);
    }
}
