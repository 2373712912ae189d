//! Appointment DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Appointment;

/// Request to create a new appointment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    #[validate(email)]
    pub customer_email: String,
    /// Vehicle descriptor, e.g. "Toyota Corolla 2018, CAB-1234"
    #[validate(length(min = 1, max = 200))]
    pub vehicle: String,
    /// "Service" or "Modification"
    pub service_kind: String,
    pub date: NaiveDate,
    /// Optional start time; ignored for Service bookings (slot times win)
    pub start_time: Option<NaiveTime>,
    /// Modification line items
    #[serde(default)]
    pub modifications: Vec<String>,
    pub estimated_cost: Option<f64>,
    /// Required for Service bookings
    pub time_slot_id: Option<String>,
}

/// Appointment details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentDto {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle: String,
    pub service_kind: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub assigned_employee_ids: Vec<String>,
    pub assigned_employee_names: Vec<String>,
    pub modifications: Vec<String>,
    pub estimated_cost: Option<f64>,
    pub time_slot_id: Option<String>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            customer_id: a.customer_id,
            customer_name: a.customer_name,
            customer_email: a.customer_email,
            vehicle: a.vehicle,
            service_kind: a.service_kind.as_str().to_string(),
            date: a.date,
            start_time: a.start_time,
            end_time: a.end_time,
            status: a.status.as_str().to_string(),
            assigned_employee_ids: a.assigned_employee_ids,
            assigned_employee_names: a.assigned_employee_names,
            modifications: a.modifications,
            estimated_cost: a.estimated_cost,
            time_slot_id: a.time_slot_id,
        }
    }
}

/// Request to overwrite the appointment status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// "Pending", "Approved", "In Progress", "Completed" or "Delivered"
    pub status: String,
}

/// Request to assign workshop employees
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignEmployeesRequest {
    pub employee_ids: Vec<String>,
    /// Positionally paired with `employee_ids`
    pub employee_names: Vec<String>,
}

/// Pre-flight check for a booking, same rules as creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateBookingRequest {
    /// "Service" or "Modification"
    pub service_kind: String,
    pub date: NaiveDate,
    pub time_slot_id: Option<String>,
}

/// Dry-run outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCheckDto {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Inclusive date range query
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct DateRangeParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
