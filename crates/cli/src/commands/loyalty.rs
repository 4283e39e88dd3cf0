//! Loyalty balance.

use std::io::Write;

use teezy_client::{FileStore, ShopSession};

use super::{CommandResult, finish, out};

/// Print the points balance.
///
/// # Errors
///
/// Returns an error if the balance could not be fetched.
pub async fn balance(session: &mut ShopSession<FileStore>) -> CommandResult {
    let balance = session.refresh_loyalty().await?;

    let mut out = out();
    writeln!(out, "{} points", balance.points)?;
    finish(out)
}
