//! Order submission and history.

use std::io::Write;

use std::fmt::Display;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use teezy_client::{FileStore, ShopSession};
use teezy_core::{OrderForm, OrderReceipt, earliest_pickup_time, format_amount};
use thiserror::Error;

use super::{CommandResult, finish, out};

/// Pickup time argument that matches none of the accepted formats.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid pickup time '{0}', expected HH:MM or YYYY-MM-DD HH:MM")]
pub struct InvalidPickup(String);

/// Parse `HH:MM` (on `today`) or a full `YYYY-MM-DD HH:MM` local time.
///
/// # Errors
///
/// Returns `InvalidPickup` if the input matches neither format.
pub fn parse_pickup(raw: &str, today: NaiveDate) -> Result<NaiveDateTime, InvalidPickup> {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveTime::parse_from_str(raw, "%H:%M")
                .ok()
                .map(|time| today.and_time(time))
        })
        .ok_or_else(|| InvalidPickup(raw.to_string()))
}

/// Submit the cart.
///
/// # Errors
///
/// Returns an error if the pickup time is malformed, validation fails, or
/// the backend rejects the order.
pub async fn submit(
    session: &mut ShopSession<FileStore>,
    pickup: Option<&str>,
    asap: bool,
    discount_code: Option<String>,
) -> CommandResult {
    let now = Local::now();
    let pickup_time = match pickup {
        Some(raw) => Some(parse_pickup(raw, now.date_naive())?),
        None if asap => Some(earliest_pickup_time(&now)),
        None => None,
    };

    let form = OrderForm {
        pickup_time,
        discount_code,
    };
    let receipt = session.submit_order(&form).await?;

    let mut out = out();
    write_receipt(&mut out, &receipt, &Local)?;
    finish(out)
}

/// Write the receipt with the pickup time shown in `tz`.
fn write_receipt<Tz>(out: &mut impl Write, receipt: &OrderReceipt, tz: &Tz) -> std::io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pickup = receipt.pickup_time.with_timezone(tz);
    writeln!(out, "Order #{}", receipt.order_id.as_i32())?;
    writeln!(out, "  Total   {}", format_amount(receipt.total_price))?;
    writeln!(out, "  Pickup  {}", pickup.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "  Points  +{}", receipt.points_earned)
}

/// Print past orders.
///
/// # Errors
///
/// Returns an error if the history could not be fetched.
pub async fn history(session: &ShopSession<FileStore>) -> CommandResult {
    let orders = session.order_history().await?;

    let mut out = out();
    if orders.is_empty() {
        writeln!(out, "No orders yet")?;
    }
    for order in &orders {
        let status = order.status.as_deref().unwrap_or("unknown");
        let pickup = order.pickup_time.with_timezone(&Local);
        writeln!(
            out,
            "  #{:<6} {:<12} {:>12}  pickup {}",
            order.id.as_i32(),
            status,
            format_amount(order.total_price),
            pickup.format("%Y-%m-%d %H:%M")
        )?;
    }
    finish(out)
}
