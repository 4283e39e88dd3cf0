//! Cart commands.

use std::io::Write;

use teezy_client::{FileStore, ShopSession};
use teezy_core::{Cart, MenuItemId, QuantityChange, format_amount};

use super::{CommandResult, finish, out};

/// Print the persisted cart.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn show(session: &ShopSession<FileStore>) -> CommandResult {
    let mut out = out();
    write_cart(&mut out, session.cart())?;
    finish(out)
}

/// Add one unit of a menu item.
///
/// # Errors
///
/// Returns an error if the menu could not be fetched or the item is not on it.
pub async fn add(session: &mut ShopSession<FileStore>, id: MenuItemId) -> CommandResult {
    session.refresh_catalog().await?;
    let quantity = session.add_item(id)?;

    let mut out = out();
    writeln!(out, "Item {id} now x{quantity}")?;
    write_cart(&mut out, session.cart())?;
    finish(out)
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn change(session: &mut ShopSession<FileStore>, id: MenuItemId, delta: i32) -> CommandResult {
    let mut out = out();
    match session.change_quantity(id, delta) {
        QuantityChange::Absent => writeln!(out, "Item {id} is not in the cart")?,
        QuantityChange::Updated(quantity) => writeln!(out, "Item {id} now x{quantity}")?,
        QuantityChange::Removed => writeln!(out, "Item {id} removed")?,
    }
    write_cart(&mut out, session.cart())?;
    finish(out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn clear(session: &mut ShopSession<FileStore>) -> CommandResult {
    session.clear_cart();
    let mut out = out();
    writeln!(out, "Cart cleared")?;
    finish(out)
}

/// Render cart lines, the item count and the total.
pub fn write_cart(out: &mut impl Write, cart: &Cart) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    for line in cart.lines() {
        writeln!(
            out,
            "  {:>4}  {:<32} x{:<3} {:>12}",
            line.menu_item_id.as_i32(),
            line.name,
            line.quantity,
            format_amount(line.subtotal())
        )?;
    }
    writeln!(
        out,
        "  {} items, total {}",
        cart.item_count(),
        format_amount(cart.total())
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use teezy_core::CartLine;

    use super::*;

    #[test]
    fn test_write_cart() {
        let cart = Cart::from_lines(vec![CartLine {
            menu_item_id: MenuItemId::new(3),
            quantity: 2,
            name: "Matcha Latte".to_string(),
            price: Decimal::new(150, 0),
        }]);

        let mut buf = Vec::new();
        write_cart(&mut buf, &cart).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Matcha Latte"));
        assert!(text.contains("2 items, total 300.00 ₽"));
    }

    #[test]
    fn test_write_empty_cart() {
        let mut buf = Vec::new();
        write_cart(&mut buf, &Cart::new()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Cart is empty\n");
    }
}
