//! Stripe payment gateway client
//!
//! Calls `POST /v1/payment_intents` with the booking ID in metadata. Errors
//! map to `Dependency` and bubble to the caller unretried — a duplicate
//! intent is worse than a visible failure.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::payments::{PaymentGateway, PaymentIntent};
use crate::domain::{DomainError, DomainResult};

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        reference: &str,
    ) -> DomainResult<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("metadata[booking_id]", reference),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        debug!(reference = %reference, amount = %amount, "Requesting payment intent");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| DomainError::Dependency(format!("Payment gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<StripeErrorResponse>()
                .await
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(DomainError::Dependency(format!(
                "Payment gateway error: {message}"
            )));
        }

        let body: StripeIntentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Dependency(format!("Malformed gateway response: {e}")))?;

        Ok(PaymentIntent {
            client_secret: body.client_secret,
            intent_id: body.id,
        })
    }
}
