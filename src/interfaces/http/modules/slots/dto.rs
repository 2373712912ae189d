//! Time slot DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TimeSlot;

/// Slot details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeSlotDto {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<TimeSlot> for TimeSlotDto {
    fn from(s: TimeSlot) -> Self {
        Self {
            id: s.id,
            date: s.date,
            start_time: s.start_time,
            end_time: s.end_time,
            is_available: s.is_available,
        }
    }
}

/// Availability query for one date
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct SlotDateParams {
    pub date: NaiveDate,
}
