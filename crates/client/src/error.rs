//! Errors surfaced by session workflows.

use teezy_core::{CartError, OrderValidationError};
use thiserror::Error;

use crate::api::RequestError;

/// Failure of a user-initiated session operation.
///
/// Every variant displays as a message fit to show the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Backend request failed; the message comes from the backend when it sent one.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Cart mutation rejected (unknown menu item).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Order form or cart failed validation before any request was sent.
    #[error(transparent)]
    Validation(#[from] OrderValidationError),

    /// The backend has no favorite order for this user.
    #[error("no favorite order saved")]
    NoFavoriteOrder,

    /// Another submission is still waiting for the backend.
    #[error("an order is already being submitted")]
    SubmissionInFlight,
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
