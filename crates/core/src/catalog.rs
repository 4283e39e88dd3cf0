//! Menu items and the session's read-only catalog snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::MenuItemId;

/// A purchasable menu item as returned by `GET /menu/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

const fn default_available() -> bool {
    true
}

/// Read-only list of menu items, in backend order.
///
/// Replaced wholesale on refresh; never mutated item by item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Create a catalog from a fetched item list.
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Look up an item by identifier.
    ///
    /// A stale cart line can reference an item that is no longer on the menu,
    /// so absence is an ordinary outcome.
    #[must_use]
    pub fn find_by_id(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<MenuItem>> for Catalog {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_item() {
        let json = r#"{
            "id": 3,
            "name": "Matcha Latte",
            "description": null,
            "price": "150.00",
            "category": "tea",
            "image_url": null,
            "is_available": true
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, MenuItemId::new(3));
        assert_eq!(item.price, Decimal::new(15000, 2));
        assert_eq!(item.category.as_deref(), Some("tea"));
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id": 1, "name": "Oolong", "price": 99.5}"#).unwrap();
        assert!(item.is_available);
        assert!(item.image_url.is_none());
        assert_eq!(item.price, Decimal::new(995, 1));
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::new(vec![MenuItem {
            id: MenuItemId::new(1),
            name: "Oolong".to_string(),
            price: Decimal::new(120, 0),
            description: None,
            category: None,
            image_url: None,
            is_available: true,
        }]);

        assert_eq!(catalog.find_by_id(MenuItemId::new(1)).unwrap().name, "Oolong");
        assert!(catalog.find_by_id(MenuItemId::new(2)).is_none());
    }
}
