//! Named collections held by the store.

use std::fmt;

/// The five named, homogeneous collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Items,
    Categories,
    Suppliers,
    Bills,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Items,
        Collection::Categories,
        Collection::Suppliers,
        Collection::Bills,
        Collection::Users,
    ];

    /// Storage name, also the file stem of the JSON backend.
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Items => "items",
            Collection::Categories => "categories",
            Collection::Suppliers => "suppliers",
            Collection::Bills => "bills",
            Collection::Users => "users",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Collection::Items => 0,
            Collection::Categories => 1,
            Collection::Suppliers => 2,
            Collection::Bills => 3,
            Collection::Users => 4,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_distinct() {
        for (i, c) in Collection::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(Collection::Bills.to_string(), "bills");
    }
}
