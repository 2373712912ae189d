//! Appointment store interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Appointment;
use crate::domain::DomainResult;

/// Typed persistence façade for appointment records.
///
/// No business validation happens here; the booking service owns the rules.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert or fully replace. A fresh ID is assigned when `appointment.id`
    /// is empty; the persisted record is returned.
    async fn save(&self, appointment: Appointment) -> DomainResult<Appointment>;

    /// Find an appointment by ID.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Appointment>>;

    /// All appointments.
    async fn find_all(&self) -> DomainResult<Vec<Appointment>>;

    /// All appointments for one customer.
    async fn find_by_customer(&self, customer_id: &str) -> DomainResult<Vec<Appointment>>;

    /// Appointments with `start <= date <= end`, ordered by date then start
    /// time.
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Appointment>>;

    /// Delete by ID. Deleting an absent record is a no-op.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
