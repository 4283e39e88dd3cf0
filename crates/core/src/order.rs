//! Order payloads, form validation and submission state.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{MenuItemId, OrderId, StoreId, points_for_total, timestamp};

/// Minimum lead time the pickup form offers.
pub const MIN_PICKUP_LEAD_MINUTES: i64 = 15;

/// Validation failures detected before any network call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("choose a pickup time")]
    MissingPickupTime,

    /// The local time does not exist in the local time zone (DST gap).
    #[error("pickup time {0} does not exist in the local time zone")]
    InvalidPickupTime(NaiveDateTime),
}

/// `{menu_item_id, quantity}` pair used by orders and favorite orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Inputs collected from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    /// Pickup time as entered, in local wall-clock time.
    pub pickup_time: Option<NaiveDateTime>,
    /// Raw discount code input; blank means none.
    pub discount_code: Option<String>,
}

impl OrderForm {
    /// Discount code trimmed, with blank input treated as absent.
    #[must_use]
    pub fn normalized_discount_code(&self) -> Option<String> {
        self.discount_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
    }
}

/// Body of `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    pub discount_code: Option<String>,
    #[serde(with = "timestamp")]
    pub pickup_time: DateTime<Utc>,
    pub store_id: StoreId,
}

impl OrderRequest {
    /// Validate the cart and form and build the request.
    ///
    /// Checks run in order: empty cart, missing pickup time, then conversion
    /// of the local pickup time to an absolute timestamp in `tz`.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`OrderValidationError`].
    pub fn build<Tz: TimeZone>(
        cart: &Cart,
        form: &OrderForm,
        store_id: StoreId,
        tz: &Tz,
    ) -> Result<Self, OrderValidationError> {
        if cart.is_empty() {
            return Err(OrderValidationError::EmptyCart);
        }
        let local = form
            .pickup_time
            .ok_or(OrderValidationError::MissingPickupTime)?;
        let pickup_time = to_absolute_pickup(local, tz)
            .ok_or(OrderValidationError::InvalidPickupTime(local))?;

        Ok(Self {
            items: cart.to_order_lines(),
            discount_code: form.normalized_discount_code(),
            pickup_time,
            store_id,
        })
    }
}

/// Convert a local wall-clock pickup time to UTC.
///
/// Ambiguous times (DST fold) resolve to the earlier instant; nonexistent
/// times yield `None`.
#[must_use]
pub fn to_absolute_pickup<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Earliest pickup time the form should offer: now plus the lead time,
/// truncated to the minute.
#[must_use]
pub fn earliest_pickup_time<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    let earliest = now.naive_local() + Duration::minutes(MIN_PICKUP_LEAD_MINUTES);
    earliest
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(earliest)
}

/// Line of a created order, as echoed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrderItem {
    pub id: i64,
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

/// Order returned by `POST /orders/` and `GET /orders/my`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
    #[serde(default)]
    pub status: Option<String>,
    pub total_price: Decimal,
    #[serde(with = "timestamp")]
    pub pickup_time: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<CreatedOrderItem>,
}

/// What the caller shows after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub total_price: Decimal,
    pub pickup_time: DateTime<Utc>,
    /// Estimate of points earned: `floor(total / 100)`.
    pub points_earned: u64,
}

impl From<&CreatedOrder> for OrderReceipt {
    fn from(order: &CreatedOrder) -> Self {
        Self {
            order_id: order.id,
            total_price: order.total_price,
            pickup_time: order.pickup_time,
            points_earned: points_for_total(order.total_price),
        }
    }
}

/// Lifecycle of one submission attempt.
///
/// `Idle -> Validating -> Submitting -> {Succeeded, Failed}`. A new attempt
/// always starts again from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// `Succeeded` and `Failed` end an attempt.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Validating => write!(f, "validating"),
            Self::Submitting => write!(f, "submitting"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
