//! Time slot HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::booking::BookingService;
use crate::interfaces::http::common::{reject, ApiResponse};

use super::dto::*;

/// Application state for slot handlers.
#[derive(Clone)]
pub struct SlotAppState {
    pub booking: Arc<BookingService>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    get,
    path = "/api/bookings/slots",
    tag = "Slots",
    params(SlotDateParams),
    responses(
        (status = 200, description = "Slots for the date, ordered by start time", body = ApiResponse<Vec<TimeSlotDto>>)
    )
)]
pub async fn slots_for_date(
    State(state): State<SlotAppState>,
    Query(params): Query<SlotDateParams>,
) -> HandlerResult<Vec<TimeSlotDto>> {
    let slots = state
        .booking
        .slots_for_date(params.date)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        slots.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bookings/slots/{id}",
    tag = "Slots",
    params(("id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot found", body = ApiResponse<TimeSlotDto>),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn get_slot(
    State(state): State<SlotAppState>,
    Path(id): Path<String>,
) -> HandlerResult<TimeSlotDto> {
    let slot = state.booking.get_slot(&id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(slot.into())))
}
