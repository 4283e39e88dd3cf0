//! Menu listing.

use std::io::Write;

use teezy_client::{FileStore, ShopSession};
use teezy_core::format_amount;

use super::{CommandResult, finish, out};

/// Fetch the menu and print it grouped by category.
///
/// # Errors
///
/// Returns an error if the menu could not be fetched.
pub async fn list(session: &mut ShopSession<FileStore>) -> CommandResult {
    session.refresh_catalog().await?;

    let mut out = out();
    let mut items: Vec<_> = session.catalog().items().iter().collect();
    items.sort_by(|a, b| a.category.cmp(&b.category));

    let mut heading = None;
    for item in items {
        let category = item.category.as_deref().unwrap_or("Other");
        if heading != Some(category) {
            heading = Some(category);
            writeln!(out, "\n{category}")?;
        }

        let marker = if item.is_available { "" } else { " (sold out)" };
        writeln!(
            out,
            "  {:>4}  {:<32} {:>12}{marker}",
            item.id.as_i32(),
            item.name,
            format_amount(item.price)
        )?;
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(out, "        {description}")?;
        }
    }

    finish(out)
}
