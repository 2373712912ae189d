//! Time slot domain entity

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A fixed-capacity service bay slot for one calendar date.
///
/// Invariant: `is_available == appointment_id.is_none()`. The slot is only
/// mutated through the registry's claim/release operations, which preserve
/// this pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot ID
    pub id: String,
    pub date: NaiveDate,
    /// Slot window start (08:00, 11:00, 14:00)
    pub start_time: NaiveTime,
    /// Slot window end (11:00, 14:00, 17:00)
    pub end_time: NaiveTime,
    pub is_available: bool,
    /// Owning appointment, `None` while the slot is free
    pub appointment_id: Option<String>,
}

impl TimeSlot {
    /// Create a fresh, unclaimed slot.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time,
            end_time,
            is_available: true,
            appointment_id: None,
        }
    }

    /// Mark the slot as booked by `appointment_id`.
    pub fn claim(&mut self, appointment_id: impl Into<String>) {
        self.is_available = false;
        self.appointment_id = Some(appointment_id.into());
    }

    /// Return the slot to the free pool.
    pub fn release(&mut self) {
        self.is_available = true;
        self.appointment_id = None;
    }

    /// Availability/owner pairing holds.
    pub fn is_consistent(&self) -> bool {
        self.is_available == self.appointment_id.is_none()
    }
}

// ── Tests ──────────────────────────────────────────────────────
