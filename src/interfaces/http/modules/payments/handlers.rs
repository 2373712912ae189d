//! Payment HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::payments::PaymentService;
use crate::interfaces::http::common::{reject, ApiResponse};

use super::dto::*;

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payment-intent",
    tag = "Payments",
    params(("id" = String, Path, description = "Booking (appointment) ID")),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = ApiResponse<PaymentIntentResponse>),
        (status = 400, description = "No amount available"),
        (status = 404, description = "Booking not found"),
        (status = 502, description = "Payment gateway failure")
    )
)]
pub async fn create_payment_intent(
    State(state): State<PaymentAppState>,
    Path(id): Path<String>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<
    Json<ApiResponse<PaymentIntentResponse>>,
    (StatusCode, Json<ApiResponse<PaymentIntentResponse>>),
> {
    let intent = state
        .payments
        .create_intent_for_booking(&id, request.amount)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(PaymentIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.intent_id,
    })))
}
