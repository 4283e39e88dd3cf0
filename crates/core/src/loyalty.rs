//! Loyalty balance and favorite-order payloads.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::order::OrderLine;
use crate::types::MenuItemId;

/// Body of `GET /loyalty/balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoyaltyBalance {
    pub points: i64,
}

/// Body of `GET /loyalty/favorite` when a favorite exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FavoriteOrder {
    /// Usable lines only. Malformed entries and non-positive quantities are dropped.
    #[serde(default, deserialize_with = "lenient_lines")]
    pub order_details: Vec<OrderLine>,
    #[serde(default)]
    pub name: Option<String>,
}

impl FavoriteOrder {
    /// A favorite with no lines is treated as not saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order_details.is_empty()
    }
}

/// Favorite entry as stored by the backend, which accepts arbitrary objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLine {
    Line { menu_item_id: MenuItemId, quantity: i64 },
    Unusable(#[allow(dead_code)] IgnoredAny),
}

/// Decode favorite lines one by one.
///
/// Entries that are not `{menu_item_id, quantity}` objects, or whose
/// quantity is not positive, are dropped instead of failing the whole
/// favorite.
fn lenient_lines<'de, D>(deserializer: D) -> Result<Vec<OrderLine>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<Vec<StoredLine>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(stored
        .into_iter()
        .filter_map(|entry| match entry {
            StoredLine::Line {
                menu_item_id,
                quantity,
            } if quantity > 0 => Some(OrderLine {
                menu_item_id,
                quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
            }),
            StoredLine::Line { .. } | StoredLine::Unusable(_) => None,
        })
        .collect())
}

/// Body of `POST /loyalty/favorite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFavoriteRequest {
    pub items: Vec<OrderLine>,
    pub name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_null_body() {
        let favorite: Option<FavoriteOrder> = serde_json::from_str("null").unwrap();
        assert!(favorite.is_none());
    }

    #[test]
    fn test_favorite_lines() {
        let favorite: FavoriteOrder = serde_json::from_str(
            r#"{"order_details": [{"menu_item_id": 2, "quantity": 3}], "name": "Morning"}"#,
        )
        .unwrap();

        assert!(!favorite.is_empty());
        assert_eq!(
            favorite.order_details,
            vec![OrderLine {
                menu_item_id: MenuItemId::new(2),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn test_favorite_skips_unusable_lines() {
        let favorite: FavoriteOrder = serde_json::from_str(
            r#"{"order_details": [
                {"menu_item_id": 2, "quantity": 2},
                {"menu_item_id": 3, "quantity": -1},
                {"menu_item_id": 4, "quantity": 0},
                {"menu_item_id": "latte", "quantity": 1},
                {"quantity": 5},
                "oolong",
                {"menu_item_id": 1, "quantity": 1, "note": "extra hot"}
            ], "name": null}"#,
        )
        .unwrap();

        assert_eq!(
            favorite.order_details,
            vec![
                OrderLine {
                    menu_item_id: MenuItemId::new(2),
                    quantity: 2,
                },
                OrderLine {
                    menu_item_id: MenuItemId::new(1),
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn test_favorite_only_unusable_lines_is_empty() {
        let favorite: FavoriteOrder = serde_json::from_str(
            r#"{"order_details": [{"menu_item_id": 3, "quantity": -2}], "name": "Old"}"#,
        )
        .unwrap();
        assert!(favorite.is_empty());

        let favorite: FavoriteOrder =
            serde_json::from_str(r#"{"order_details": null, "name": null}"#).unwrap();
        assert!(favorite.is_empty());
    }
}
