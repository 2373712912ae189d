//! Time slot registry interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::TimeSlot;
use crate::domain::DomainResult;

/// Registry owning all time slots and the atomic claim/release protocol.
///
/// `claim` is the sole mechanism preventing double-booking: it must be a
/// single conditional update at the storage layer (available → booked),
/// never a read-then-write pair, so that exactly one of N concurrent
/// claimers wins. There is no queuing — losers fail immediately with
/// `Conflict` and must resubmit with a different slot.
#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Find a slot by ID.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TimeSlot>>;

    /// All slots for a date, ordered by start time.
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<TimeSlot>>;

    /// Insert or replace a slot (batch seeding by the scheduling job).
    async fn save(&self, slot: TimeSlot) -> DomainResult<()>;

    /// Atomically transition the slot from available to booked, recording
    /// `appointment_id` as the owner. Returns the updated slot (the caller
    /// stamps the appointment with its start/end time).
    ///
    /// Errors: `NotFound` if the slot does not exist, `Conflict` if it was
    /// already booked at the moment of the attempt.
    async fn claim(&self, id: &str, appointment_id: &str) -> DomainResult<TimeSlot>;

    /// Make the slot available again and clear its owner. Calling this on
    /// an already-available slot is a no-op success, since cancellation can
    /// race with external cleanup.
    async fn release(&self, id: &str) -> DomainResult<TimeSlot>;
}
