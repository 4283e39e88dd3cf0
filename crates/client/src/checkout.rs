//! Order submission.
//!
//! Submission validates the cart and form locally, posts the order, and on
//! success clears the cart and refreshes the loyalty balance. A failed
//! attempt never touches the cart, so the user can fix the form and retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, TimeZone};
use teezy_core::{OrderForm, OrderReceipt, OrderRequest, SubmissionState, format_amount};
use tracing::{error, info, instrument, warn};

use crate::error::{Result, SessionError};
use crate::host::HostEvent;
use crate::session::ShopSession;
use crate::store::KeyValueStore;

/// Shared view of whether a submission may start.
///
/// Clones observe the same flag, so a UI can hold one to grey out its
/// submit button while an order is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
    in_flight: Arc<AtomicBool>,
}

impl SubmitControl {
    /// `false` while a submission is waiting for the backend.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the control; `None` if another submission holds it.
    pub(crate) fn try_acquire(&self) -> Option<FlightPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }
}

/// Held for the duration of one submission; re-enables the control on drop.
#[derive(Debug)]
pub(crate) struct FlightPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

impl<S: KeyValueStore> ShopSession<S> {
    /// Handle to the submit control.
    #[must_use]
    pub fn submit_control(&self) -> SubmitControl {
        self.submit_control.clone()
    }

    /// State of the most recent submission attempt.
    #[must_use]
    pub const fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    /// Submit the cart as an order, reading the pickup time as local time.
    ///
    /// # Errors
    ///
    /// See [`ShopSession::submit_order_in`].
    pub async fn submit_order(&mut self, form: &OrderForm) -> Result<OrderReceipt> {
        self.submit_order_in(form, &Local).await
    }

    /// Submit the cart as an order, reading the pickup time in `tz`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmissionInFlight` if another submission holds
    /// the control, `SessionError::Validation` if the cart or form is
    /// incomplete, and `SessionError::Request` if the backend rejects the
    /// order. In every error case the cart is left as it was.
    #[instrument(skip_all, fields(lines = self.cart.len(), store_id = %self.store_id))]
    pub async fn submit_order_in<Tz: TimeZone>(
        &mut self,
        form: &OrderForm,
        tz: &Tz,
    ) -> Result<OrderReceipt> {
        let Some(_permit) = self.submit_control.try_acquire() else {
            warn!("Submission already in flight");
            return Err(SessionError::SubmissionInFlight);
        };

        self.submission = SubmissionState::Validating;
        let request = match OrderRequest::build(&self.cart, form, self.store_id, tz) {
            Ok(request) => request,
            Err(e) => {
                info!(reason = %e, "Order rejected before submission");
                self.submission = SubmissionState::Failed;
                return Err(e.into());
            }
        };

        self.submission = SubmissionState::Submitting;
        let order = match self.api.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, status = ?e.status, "Order submission failed");
                self.submission = SubmissionState::Failed;
                return Err(e.into());
            }
        };

        let receipt = OrderReceipt::from(&order);
        info!(
            order_id = %receipt.order_id,
            total = %receipt.total_price,
            points = receipt.points_earned,
            "Order placed"
        );

        self.cart.clear();
        self.store.clear();

        if let Err(e) = self.refresh_loyalty().await {
            warn!(error = %e, "Loyalty balance refresh after order failed");
        }

        self.host.notify(HostEvent::Alert(format!(
            "Order #{} placed. Total {}, about {} points earned.",
            receipt.order_id,
            format_amount(receipt.total_price),
            receipt.points_earned
        )));

        self.submission = SubmissionState::Succeeded;
        Ok(receipt)
    }
}
