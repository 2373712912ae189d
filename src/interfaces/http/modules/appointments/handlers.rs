//! Appointment HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use validator::Validate;

use crate::application::booking::{BookingService, NewAppointment};
use crate::auth::{extract_identity, JwtConfig};
use crate::domain::{AppointmentStatus, DomainError, ServiceKind};
use crate::interfaces::http::common::{reject, ApiResponse, EmptyData};

use super::dto::*;

/// Application state for appointment handlers.
#[derive(Clone)]
pub struct AppointmentAppState {
    pub booking: Arc<BookingService>,
    pub jwt: JwtConfig,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

fn parse_kind<T>(raw: &str) -> Result<ServiceKind, (StatusCode, Json<ApiResponse<T>>)> {
    ServiceKind::parse(raw).ok_or_else(|| {
        reject(DomainError::Validation(format!(
            "Unknown service kind '{raw}', expected \"Service\" or \"Modification\""
        )))
    })
}

#[utoipa::path(
    post,
    path = "/api/bookings/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment created", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Date unavailable or invalid request"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Time slot not found"),
        (status = 409, description = "Time slot already booked")
    )
)]
pub async fn create_appointment(
    State(state): State<AppointmentAppState>,
    headers: HeaderMap,
    Json(request): Json<CreateAppointmentRequest>,
) -> HandlerResult<AppointmentDto> {
    let identity = extract_identity(bearer(&headers), &state.jwt).map_err(reject)?;

    if let Err(errors) = request.validate() {
        return Err(reject(DomainError::Validation(errors.to_string())));
    }
    let service_kind = parse_kind(&request.service_kind)?;

    let appointment = state
        .booking
        .create_appointment(
            &identity,
            NewAppointment {
                customer_email: request.customer_email,
                vehicle: request.vehicle,
                service_kind,
                date: request.date,
                start_time: request.start_time,
                modifications: request.modifications,
                estimated_cost: request.estimated_cost,
                time_slot_id: request.time_slot_id,
            },
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    get,
    path = "/api/bookings/appointments",
    tag = "Appointments",
    responses(
        (status = 200, description = "All appointments", body = ApiResponse<Vec<AppointmentDto>>)
    )
)]
pub async fn list_appointments(
    State(state): State<AppointmentAppState>,
) -> HandlerResult<Vec<AppointmentDto>> {
    let appointments = state.booking.list_appointments().await.map_err(reject)?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bookings/appointments/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment found", body = ApiResponse<AppointmentDto>),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<String>,
) -> HandlerResult<AppointmentDto> {
    let appointment = state.booking.get_appointment(&id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    get,
    path = "/api/bookings/appointments/customer/{customer_id}",
    tag = "Appointments",
    params(("customer_id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer's appointments", body = ApiResponse<Vec<AppointmentDto>>)
    )
)]
pub async fn appointments_by_customer(
    State(state): State<AppointmentAppState>,
    Path(customer_id): Path<String>,
) -> HandlerResult<Vec<AppointmentDto>> {
    let appointments = state
        .booking
        .appointments_for_customer(&customer_id)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bookings/appointments/range",
    tag = "Appointments",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Appointments in range, ordered by date then start time", body = ApiResponse<Vec<AppointmentDto>>)
    )
)]
pub async fn appointments_by_range(
    State(state): State<AppointmentAppState>,
    Query(params): Query<DateRangeParams>,
) -> HandlerResult<Vec<AppointmentDto>> {
    let appointments = state
        .booking
        .appointments_in_range(params.start_date, params.end_date)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/bookings/appointments/{id}/status",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn update_status(
    State(state): State<AppointmentAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> HandlerResult<AppointmentDto> {
    let status = AppointmentStatus::parse(&request.status).ok_or_else(|| {
        reject(DomainError::Validation(format!(
            "Unknown status '{}'",
            request.status
        )))
    })?;

    let appointment = state
        .booking
        .update_status(&id, status)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    put,
    path = "/api/bookings/appointments/{id}/assign-employees",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    request_body = AssignEmployeesRequest,
    responses(
        (status = 200, description = "Employees assigned, status is Approved", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Mismatched employee lists"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn assign_employees(
    State(state): State<AppointmentAppState>,
    Path(id): Path<String>,
    Json(request): Json<AssignEmployeesRequest>,
) -> HandlerResult<AppointmentDto> {
    let appointment = state
        .booking
        .assign_employees(&id, request.employee_ids, request.employee_names)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/appointments/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Cancelled (no-op when the ID is unknown)", body = ApiResponse<EmptyData>)
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<String>,
) -> HandlerResult<EmptyData> {
    state.booking.cancel_appointment(&id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/bookings/validate",
    tag = "Appointments",
    request_body = ValidateBookingRequest,
    responses(
        (status = 200, description = "Dry-run result", body = ApiResponse<BookingCheckDto>)
    )
)]
pub async fn validate_booking(
    State(state): State<AppointmentAppState>,
    Json(request): Json<ValidateBookingRequest>,
) -> HandlerResult<BookingCheckDto> {
    let service_kind = parse_kind(&request.service_kind)?;

    let check = state
        .booking
        .validate_booking(service_kind, request.date, request.time_slot_id.as_deref())
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(BookingCheckDto {
        valid: check.valid,
        reason: check.reason,
    })))
}
