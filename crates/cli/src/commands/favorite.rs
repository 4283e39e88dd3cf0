//! Favorite order commands.

use std::io::Write;

use teezy_client::{FavoriteOutcome, FileStore, ShopSession};

use super::cart::write_cart;
use super::{CommandResult, finish, out};

/// Replace the cart with the saved favorite order.
///
/// # Errors
///
/// Returns an error if no favorite is saved or the request fails.
pub async fn load(session: &mut ShopSession<FileStore>) -> CommandResult {
    let outcome = session.load_favorite().await?;

    let mut out = out();
    match outcome {
        FavoriteOutcome::Declined => writeln!(out, "Kept the current cart")?,
        FavoriteOutcome::Loaded { missing, .. } => {
            if missing > 0 {
                writeln!(out, "{missing} item(s) are no longer on the menu")?;
            }
            write_cart(&mut out, session.cart())?;
        }
    }
    finish(out)
}

/// Save the cart as the favorite order.
///
/// # Errors
///
/// Returns an error if the cart is empty or the request fails.
pub async fn save(session: &ShopSession<FileStore>, name: Option<String>) -> CommandResult {
    session.save_favorite(name).await?;
    Ok(())
}
