//! Payment linkage
//!
//! Thin adapter between a persisted booking and the external payment
//! gateway: resolves the charge amount from the booking's estimated cost
//! (or an explicit override) and requests a payment intent referencing the
//! booking ID. Gateway errors surface as `Dependency` failures and are
//! never retried here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// A created payment intent, as handed back to the customer UI.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Client secret the frontend uses to confirm the payment
    pub client_secret: String,
    pub intent_id: String,
}

/// External payment gateway contract.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for `amount_minor` units of `currency`, tagged with
    /// the booking `reference`.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        reference: &str,
    ) -> DomainResult<PaymentIntent>;
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl PaymentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            gateway,
            currency: currency.into(),
        }
    }

    /// Request a payment intent for a persisted booking.
    ///
    /// The booking's estimated cost wins over `override_amount`; the
    /// override only applies when no estimate was recorded.
    pub async fn create_intent_for_booking(
        &self,
        booking_id: &str,
        override_amount: Option<i64>,
    ) -> DomainResult<PaymentIntent> {
        let appointment = self
            .repos
            .appointments()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", "id", booking_id))?;

        let amount = appointment
            .estimated_cost
            .map(|cost| cost as i64)
            .or(override_amount)
            .ok_or_else(|| {
                DomainError::Validation(
                    "No estimated cost on booking and no amount supplied".to_string(),
                )
            })?;

        let intent = self
            .gateway
            .create_intent(amount, &self.currency, booking_id)
            .await?;

        info!(
            booking_id = %booking_id,
            intent_id = %intent.intent_id,
            amount,
            "Payment intent created"
        );
        Ok(intent)
    }
}

// ── Tests ──────────────────────────────────────────────────────
