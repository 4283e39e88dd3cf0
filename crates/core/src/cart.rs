//! Cart lines and the reconciliation rules that keep them consistent.
//!
//! A [`Cart`] holds at most one [`CartLine`] per menu item, and every line
//! has a positive quantity. Lines carry a snapshot of the item's name and
//! price taken when they were created, so totals never drift when the menu
//! changes mid-session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::order::OrderLine;
use crate::types::MenuItemId;

/// Display name for lines whose menu item is no longer in the catalog.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Errors raised by cart mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// The requested item is not in the current catalog.
    #[error("menu item {0} not found")]
    ItemNotFound(MenuItemId),
}

/// A single cart entry.
///
/// This is also the persisted shape: `{menu_item_id, quantity, name, price}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    /// Item name at the time the line was created.
    pub name: String,
    /// Unit price at the time the line was created.
    pub price: Decimal,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line for the item; nothing to do.
    Absent,
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

impl QuantityChange {
    /// Whether the cart was modified.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Ordered cart contents, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines, restoring the cart invariants.
    ///
    /// Zero-quantity lines are dropped. Repeated identifiers are merged into
    /// the first occurrence, keeping its snapshot and summing quantities.
    #[must_use]
    pub fn from_lines(raw: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in raw {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.menu_item_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.menu_item_id == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.menu_item_id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines (the cart badge).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of snapshotted price times quantity.
    ///
    /// Uses the price captured when each line was created, never the live
    /// catalog price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Add one unit of a catalog item.
    ///
    /// Increments the existing line or appends a new line with quantity 1,
    /// snapshotting the item's current name and price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the catalog has no such item.
    pub fn add_item(&mut self, catalog: &Catalog, id: MenuItemId) -> Result<&CartLine, CartError> {
        let item = catalog.find_by_id(id).ok_or(CartError::ItemNotFound(id))?;

        let index = match self.lines.iter().position(|line| line.menu_item_id == id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(1);
                }
                index
            }
            None => {
                self.lines.push(CartLine {
                    menu_item_id: id,
                    quantity: 1,
                    name: item.name.clone(),
                    price: item.price,
                });
                self.lines.len() - 1
            }
        };

        self.lines.get(index).ok_or(CartError::ItemNotFound(id))
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// A missing line is a no-op. A result of zero or less removes the line.
    pub fn change_quantity(&mut self, id: MenuItemId, delta: i32) -> QuantityChange {
        let Some(line) = self.line_mut(id) else {
            return QuantityChange::Absent;
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.lines.retain(|line| line.menu_item_id != id);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Replace the whole cart with previously ordered lines.
    ///
    /// Names and prices are re-resolved from `catalog`; items missing from
    /// the catalog get [`UNKNOWN_ITEM_NAME`] and a zero price. Never fails.
    pub fn replace_all(&mut self, catalog: &Catalog, entries: &[OrderLine]) {
        let lines = entries
            .iter()
            .map(|entry| {
                let (name, price) = catalog.find_by_id(entry.menu_item_id).map_or_else(
                    || (UNKNOWN_ITEM_NAME.to_string(), Decimal::ZERO),
                    |item| (item.name.clone(), item.price),
                );
                CartLine {
                    menu_item_id: entry.menu_item_id,
                    quantity: entry.quantity,
                    name,
                    price,
                }
            })
            .collect();

        *self = Self::from_lines(lines);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// `{menu_item_id, quantity}` pairs in cart order.
    #[must_use]
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine {
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
            })
            .collect()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
