//! Teezy Core - Shared types and cart logic.
//!
//! This crate holds the domain model of the Teezy ordering client: menu
//! and cart types, cart reconciliation against the menu, order validation
//! and payload building, and the loyalty and promotion records the backend
//! returns.
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! storage access, no HTTP clients. Every cart mutation here is a plain
//! function of its inputs, so the reconciliation rules can be tested without
//! a backend or a host platform.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money helpers, timestamp serialization
//! - [`catalog`] - Menu items and the read-only catalog snapshot
//! - [`cart`] - Cart lines and reconciliation (add, change quantity, replace)
//! - [`order`] - Order request building, receipts, submission state
//! - [`loyalty`] - Loyalty balance and favorite orders
//! - [`promotion`] - Display-only promotions and discount codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod loyalty;
pub mod order;
pub mod promotion;
pub mod types;

pub use cart::{Cart, CartError, CartLine, QuantityChange, UNKNOWN_ITEM_NAME};
pub use catalog::{Catalog, MenuItem};
pub use loyalty::{FavoriteOrder, LoyaltyBalance, SaveFavoriteRequest};
pub use order::{
    CreatedOrder, CreatedOrderItem, OrderForm, OrderLine, OrderReceipt, OrderRequest,
    OrderValidationError, SubmissionState, earliest_pickup_time, to_absolute_pickup,
};
pub use promotion::{Discount, Promotion};
pub use types::*;
