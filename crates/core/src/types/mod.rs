//! Core types for the Teezy client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod timestamp;

pub use id::*;
pub use money::{CURRENCY_SIGN, POINTS_SPEND_UNIT, format_amount, points_for_total};
