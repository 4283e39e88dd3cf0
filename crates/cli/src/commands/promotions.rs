//! Promotions and discount codes.

use std::io::Write;

use teezy_client::{FileStore, ShopSession};

use super::{CommandResult, finish, out};

/// Print active promotions and discount codes.
///
/// # Errors
///
/// Returns an error if either list could not be fetched.
pub async fn list(session: &ShopSession<FileStore>) -> CommandResult {
    let (promotions, discounts) = session.promotions().await?;

    let mut out = out();
    writeln!(out, "Promotions")?;
    for promotion in promotions.iter().filter(|p| p.is_active) {
        writeln!(out, "  {}", promotion.title)?;
        writeln!(out, "    {}", promotion.description)?;
        if let (Some(start), Some(end)) = (promotion.start_date, promotion.end_date) {
            writeln!(out, "    {start} to {end}")?;
        }
    }

    writeln!(out, "\nDiscount codes")?;
    for discount in discounts.iter().filter(|d| d.is_active) {
        writeln!(out, "  {:<16} {}", discount.code, discount.label())?;
    }
    finish(out)
}
