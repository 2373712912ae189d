//! Payment DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create a payment intent for a booking
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Override amount in minor units; only used when the booking has no
    /// estimated cost
    pub amount: Option<i64>,
}

/// Created payment intent
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}
