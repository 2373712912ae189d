//! Booking orchestrator
//!
//! Sequences calendar policy, slot registry and appointment store into the
//! create/cancel/assign/status workflows, and enforces the one cross-entity
//! invariant: a `Service` appointment is linked to exactly one claimed slot.
//!
//! The appointment ID is generated *before* the slot claim, so the claim is
//! a single conditional write that both books the slot and records its
//! owner. There is no claimed-but-unlinked window; if persisting the
//! appointment afterwards fails, the claim is compensated by a release and
//! the original error surfaces.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ShopConfig;
use crate::domain::{
    calendar, Appointment, AppointmentStatus, DomainError, DomainResult, ModificationItem,
    RepositoryProvider, ServiceKind, TimeSlot,
};

/// Verified customer identity handed in by the boundary layer.
///
/// The core trusts these values as-is; credential checking happens before
/// any of these methods are reached.
#[derive(Debug, Clone)]
pub struct CustomerIdentity {
    pub customer_id: String,
    pub customer_name: String,
}

/// Typed creation request, validated at the boundary.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub customer_email: String,
    pub vehicle: String,
    pub service_kind: ServiceKind,
    pub date: NaiveDate,
    /// Caller-supplied start time; ignored for `Service` (slot times win),
    /// defaulted to shop opening for `Modification` when absent.
    pub start_time: Option<NaiveTime>,
    pub modifications: Vec<String>,
    pub estimated_cost: Option<f64>,
    pub time_slot_id: Option<String>,
}

/// Outcome of a dry-run booking check.
#[derive(Debug, Clone)]
pub struct BookingCheck {
    pub valid: bool,
    pub reason: Option<String>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    shop: ShopConfig,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, shop: ShopConfig) -> Self {
        Self { repos, shop }
    }

    /// Create an appointment in status `Pending`.
    ///
    /// Both kinds are gated by the business calendar. `Service` kind claims
    /// its slot atomically and takes the slot's start/end time; a lost claim
    /// race surfaces as `Conflict` and the caller must resubmit with a
    /// different slot. `Modification` kind needs no slot and defaults to
    /// the shop's full working day.
    pub async fn create_appointment(
        &self,
        identity: &CustomerIdentity,
        request: NewAppointment,
    ) -> DomainResult<Appointment> {
        self.check_date(request.date).await?;

        match request.service_kind {
            ServiceKind::Service => self.create_slot_bound(identity, request).await,
            ServiceKind::Modification => self.create_full_day(identity, request).await,
        }
    }

    async fn create_slot_bound(
        &self,
        identity: &CustomerIdentity,
        request: NewAppointment,
    ) -> DomainResult<Appointment> {
        let slot_id = Self::required_slot_id(request.time_slot_id.as_deref())?;

        // Pre-generate the ID so the claim records its owner in one write.
        let appointment_id = Uuid::new_v4().to_string();
        let slot = self.repos.slots().claim(slot_id, &appointment_id).await?;

        let appointment = Appointment {
            id: appointment_id,
            customer_id: identity.customer_id.clone(),
            customer_name: identity.customer_name.clone(),
            customer_email: request.customer_email,
            vehicle: request.vehicle,
            service_kind: ServiceKind::Service,
            date: request.date,
            // Slot times win over anything the caller supplied
            start_time: slot.start_time,
            end_time: slot.end_time,
            status: AppointmentStatus::Pending,
            assigned_employee_ids: Vec::new(),
            assigned_employee_names: Vec::new(),
            modifications: request.modifications,
            estimated_cost: request.estimated_cost,
            time_slot_id: Some(slot.id.clone()),
        };

        match self.repos.appointments().save(appointment).await {
            Ok(saved) => {
                info!(
                    id = %saved.id,
                    slot = %slot.id,
                    date = %saved.date,
                    "📋 Service appointment created"
                );
                Ok(saved)
            }
            Err(e) => {
                // Compensate the claim so the slot is not stranded.
                if let Err(release_err) = self.repos.slots().release(&slot.id).await {
                    warn!(
                        slot = %slot.id,
                        error = %release_err,
                        "Failed to release slot after save failure"
                    );
                }
                Err(e)
            }
        }
    }

    async fn create_full_day(
        &self,
        identity: &CustomerIdentity,
        request: NewAppointment,
    ) -> DomainResult<Appointment> {
        let appointment = Appointment {
            id: String::new(),
            customer_id: identity.customer_id.clone(),
            customer_name: identity.customer_name.clone(),
            customer_email: request.customer_email,
            vehicle: request.vehicle,
            service_kind: ServiceKind::Modification,
            date: request.date,
            start_time: request.start_time.unwrap_or(self.shop.opening_time),
            end_time: self.shop.closing_time,
            status: AppointmentStatus::Pending,
            assigned_employee_ids: Vec::new(),
            assigned_employee_names: Vec::new(),
            modifications: request.modifications,
            estimated_cost: request.estimated_cost,
            time_slot_id: None,
        };

        let saved = self.repos.appointments().save(appointment).await?;
        info!(id = %saved.id, date = %saved.date, "📋 Modification appointment created");
        Ok(saved)
    }

    /// Dry-run the same checks `create_appointment` performs, without
    /// mutating anything. Shares the calendar and slot helpers with the
    /// create path so the two cannot drift apart.
    pub async fn validate_booking(
        &self,
        service_kind: ServiceKind,
        date: NaiveDate,
        time_slot_id: Option<&str>,
    ) -> DomainResult<BookingCheck> {
        if let Err(e) = self.check_date(date).await {
            return Self::check_failed(e);
        }

        if service_kind == ServiceKind::Service {
            let slot_id = match Self::required_slot_id(time_slot_id) {
                Ok(id) => id,
                Err(e) => return Self::check_failed(e),
            };
            match self.lookup_slot(slot_id).await {
                Ok(slot) if slot.is_available => {}
                Ok(_) => {
                    return Self::check_failed(DomainError::Conflict(format!(
                        "Time slot {} is already booked",
                        slot_id
                    )))
                }
                Err(e @ DomainError::NotFound { .. }) => return Self::check_failed(e),
                Err(e) => return Err(e),
            }
        }

        Ok(BookingCheck {
            valid: true,
            reason: None,
        })
    }

    /// Look up one appointment.
    pub async fn get_appointment(&self, id: &str) -> DomainResult<Appointment> {
        self.repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", "id", id))
    }

    pub async fn list_appointments(&self) -> DomainResult<Vec<Appointment>> {
        self.repos.appointments().find_all().await
    }

    pub async fn appointments_for_customer(
        &self,
        customer_id: &str,
    ) -> DomainResult<Vec<Appointment>> {
        self.repos.appointments().find_by_customer(customer_id).await
    }

    pub async fn appointments_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Appointment>> {
        self.repos.appointments().find_by_date_range(start, end).await
    }

    /// Write a new status. Any status value is accepted as long as the
    /// appointment exists — transition legality is the caller's business.
    pub async fn update_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DomainResult<Appointment> {
        let mut appointment = self.get_appointment(id).await?;
        appointment.status = status;
        let saved = self.repos.appointments().save(appointment).await?;
        info!(id = %id, status = %status, "Appointment status updated");
        Ok(saved)
    }

    /// Replace both employee lists and force status `Approved`.
    ///
    /// The lists are positionally paired, so their lengths must match.
    pub async fn assign_employees(
        &self,
        id: &str,
        employee_ids: Vec<String>,
        employee_names: Vec<String>,
    ) -> DomainResult<Appointment> {
        if employee_ids.len() != employee_names.len() {
            return Err(DomainError::Validation(
                "employee_ids and employee_names must have the same length".to_string(),
            ));
        }

        let mut appointment = self.get_appointment(id).await?;
        appointment.assign_employees(employee_ids, employee_names);
        let saved = self.repos.appointments().save(appointment).await?;
        info!(id = %id, assigned = saved.assigned_employee_ids.len(), "Employees assigned");
        Ok(saved)
    }

    /// Cancel an appointment: release its slot (Service kind), then delete
    /// the record. Cancelling an unknown ID is a silent no-op.
    pub async fn cancel_appointment(&self, id: &str) -> DomainResult<()> {
        let Some(appointment) = self.repos.appointments().find_by_id(id).await? else {
            return Ok(());
        };

        if appointment.is_slot_bound() {
            if let Some(slot_id) = &appointment.time_slot_id {
                self.repos.slots().release(slot_id).await?;
            }
        }

        self.repos.appointments().delete(id).await?;
        info!(id = %id, "Appointment cancelled");
        Ok(())
    }

    /// Slot availability listing for a date (customer-facing calendar).
    pub async fn slots_for_date(&self, date: NaiveDate) -> DomainResult<Vec<TimeSlot>> {
        self.repos.slots().find_by_date(date).await
    }

    /// Look up one slot.
    pub async fn get_slot(&self, id: &str) -> DomainResult<TimeSlot> {
        self.lookup_slot(id).await
    }

    /// The catalog of modifications the workshop offers, ordered by name.
    pub async fn modification_catalog(&self) -> DomainResult<Vec<ModificationItem>> {
        self.repos.modification_items().find_all().await
    }

    // ── Shared gate helpers (used by create and validate) ─────

    async fn check_date(&self, date: NaiveDate) -> DomainResult<()> {
        if !calendar::is_bookable(date, self.repos.blackouts()).await? {
            return Err(DomainError::Validation(format!(
                "Date {} is unavailable (holiday/maintenance or the shop is closed)",
                date
            )));
        }
        Ok(())
    }

    fn required_slot_id(time_slot_id: Option<&str>) -> DomainResult<&str> {
        match time_slot_id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(DomainError::Validation(
                "Time slot ID is required for Service appointments".to_string(),
            )),
        }
    }

    async fn lookup_slot(&self, id: &str) -> DomainResult<TimeSlot> {
        self.repos
            .slots()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("TimeSlot", "id", id))
    }

    fn check_failed(error: DomainError) -> DomainResult<BookingCheck> {
        Ok(BookingCheck {
            valid: false,
            reason: Some(error.to_string()),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveTime;

    use super::*;
    use crate::infrastructure::storage::InMemoryStore;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    }

    fn identity() -> CustomerIdentity {
        CustomerIdentity {
            customer_id: "cust-1".into(),
            customer_name: "Nimal Perera".into(),
        }
    }

    fn service_request(slot_id: Option<String>) -> NewAppointment {
        NewAppointment {
            customer_email: "nimal@example.com".into(),
            vehicle: "Toyota Corolla 2018".into(),
            service_kind: ServiceKind::Service,
            date: monday(),
            // Deliberately wrong; the claimed slot's times must win
            start_time: Some(NaiveTime::from_hms_opt(6, 30, 0).unwrap()),
            modifications: vec![],
            estimated_cost: Some(15000.0),
            time_slot_id: slot_id,
        }
    }

    fn modification_request(date: NaiveDate, start: Option<NaiveTime>) -> NewAppointment {
        NewAppointment {
            customer_email: "nimal@example.com".into(),
            vehicle: "Nissan Leaf".into(),
            service_kind: ServiceKind::Modification,
            date,
            start_time: start,
            modifications: vec!["Body kit".into(), "Alloy wheels".into()],
            estimated_cost: Some(80000.0),
            time_slot_id: None,
        }
    }

    fn harness() -> (BookingService, Arc<InMemoryStore>, Vec<String>) {
        let store = Arc::new(InMemoryStore::new());
        let slot_ids = store.seed_day(monday());
        let service = BookingService::new(store.clone(), crate::config::ShopConfig::default());
        (service, store, slot_ids)
    }

    #[tokio::test]
    async fn service_booking_claims_slot_and_stamps_times() {
        let (service, store, slot_ids) = harness();

        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(appt.end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert_eq!(appt.time_slot_id.as_deref(), Some(slot_ids[0].as_str()));

        let slot = store.slots().find_by_id(&slot_ids[0]).await.unwrap().unwrap();
        assert!(!slot.is_available);
        assert_eq!(slot.appointment_id.as_deref(), Some(appt.id.as_str()));
    }

    #[tokio::test]
    async fn second_booking_on_same_slot_conflicts() {
        let (service, _store, slot_ids) = harness();

        service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        let err = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn service_booking_without_slot_id_rejected() {
        let (service, _store, _slot_ids) = harness();
        for slot_id in [None, Some(String::new())] {
            let err = service
                .create_appointment(&identity(), service_request(slot_id))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn sunday_rejected_for_both_kinds() {
        let (service, store, _slot_ids) = harness();
        store.seed_day(sunday());

        let mut request = service_request(None);
        request.date = sunday();
        let err = service
            .create_appointment(&identity(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .create_appointment(&identity(), modification_request(sunday(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn blackout_date_rejected() {
        let (service, store, slot_ids) = harness();
        store.add_blackout(monday());

        let err = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The slot was never touched
        let slot = store.slots().find_by_id(&slot_ids[0]).await.unwrap().unwrap();
        assert!(slot.is_available);
    }

    #[tokio::test]
    async fn modification_defaults_to_full_working_day() {
        let (service, _store, _slot_ids) = harness();

        let appt = service
            .create_appointment(&identity(), modification_request(monday(), None))
            .await
            .unwrap();

        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(appt.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert!(appt.time_slot_id.is_none());
        assert!(!appt.id.is_empty());
    }

    #[tokio::test]
    async fn modification_keeps_caller_start_time() {
        let (service, _store, _slot_ids) = harness();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        let appt = service
            .create_appointment(&identity(), modification_request(monday(), Some(ten)))
            .await
            .unwrap();

        assert_eq!(appt.start_time, ten);
        assert_eq!(appt.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn cancel_releases_slot_and_deletes_record() {
        let (service, store, slot_ids) = harness();

        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        service.cancel_appointment(&appt.id).await.unwrap();

        let slot = store.slots().find_by_id(&slot_ids[0]).await.unwrap().unwrap();
        assert!(slot.is_available);
        assert!(slot.appointment_id.is_none());

        let all = service.list_appointments().await.unwrap();
        assert!(all.iter().all(|a| a.id != appt.id));

        // And the slot is immediately reusable
        service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancel_unknown_id_is_silent_noop() {
        let (service, _store, _slot_ids) = harness();
        service.cancel_appointment("no-such-id").await.unwrap();
    }

    #[tokio::test]
    async fn assign_employees_approves_and_pairs_lists() {
        let (service, _store, slot_ids) = harness();

        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        let updated = service
            .assign_employees(
                &appt.id,
                vec!["e1".into(), "e2".into()],
                vec!["Kasun".into(), "Ruwan".into()],
            )
            .await
            .unwrap();

        assert_eq!(updated.status, AppointmentStatus::Approved);
        assert_eq!(updated.assigned_employee_ids, vec!["e1", "e2"]);
        assert_eq!(updated.assigned_employee_names, vec!["Kasun", "Ruwan"]);
    }

    #[tokio::test]
    async fn assign_employees_rejects_mismatched_lists() {
        let (service, _store, slot_ids) = harness();
        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        let err = service
            .assign_employees(&appt.id, vec!["e1".into()], vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_status_writes_any_status() {
        let (service, _store, slot_ids) = harness();
        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        // Straight to Delivered; legality is the caller's business
        let updated = service
            .update_status(&appt.id, AppointmentStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Delivered);
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_not_found() {
        let (service, _store, _slot_ids) = harness();
        let err = service
            .update_status("missing", AppointmentStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn validate_matches_create_for_good_booking() {
        let (service, _store, slot_ids) = harness();

        let check = service
            .validate_booking(ServiceKind::Service, monday(), Some(&slot_ids[0]))
            .await
            .unwrap();
        assert!(check.valid);
        assert!(check.reason.is_none());

        // The dry run must not have claimed anything
        service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn validate_flags_sunday_blackout_and_taken_slot() {
        let (service, store, slot_ids) = harness();

        let check = service
            .validate_booking(ServiceKind::Modification, sunday(), None)
            .await
            .unwrap();
        assert!(!check.valid);

        service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();
        let check = service
            .validate_booking(ServiceKind::Service, monday(), Some(&slot_ids[0]))
            .await
            .unwrap();
        assert!(!check.valid);
        assert!(check.reason.unwrap().contains("already booked"));

        store.add_blackout(monday());
        let check = service
            .validate_booking(ServiceKind::Service, monday(), Some(&slot_ids[1]))
            .await
            .unwrap();
        assert!(!check.valid);
    }

    #[tokio::test]
    async fn validate_flags_missing_and_unknown_slot() {
        let (service, _store, _slot_ids) = harness();

        let check = service
            .validate_booking(ServiceKind::Service, monday(), None)
            .await
            .unwrap();
        assert!(!check.valid);

        let check = service
            .validate_booking(ServiceKind::Service, monday(), Some("no-such-slot"))
            .await
            .unwrap();
        assert!(!check.valid);
    }

    #[tokio::test]
    async fn customer_and_range_queries() {
        let (service, _store, slot_ids) = harness();

        let appt = service
            .create_appointment(&identity(), service_request(Some(slot_ids[0].clone())))
            .await
            .unwrap();

        let other = CustomerIdentity {
            customer_id: "cust-2".into(),
            customer_name: "Sunil".into(),
        };
        service
            .create_appointment(&other, modification_request(monday(), None))
            .await
            .unwrap();

        let mine = service.appointments_for_customer("cust-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, appt.id);

        let ranged = service
            .appointments_in_range(monday(), monday())
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);
    }

    #[tokio::test]
    async fn modification_catalog_lists_seeded_items() {
        let (service, store, _slot_ids) = harness();
        store.add_modification_item(ModificationItem::new(
            "mod-2",
            "Spoiler",
            2,
            12000,
            None,
        ));
        store.add_modification_item(ModificationItem::new(
            "mod-1",
            "Alloy wheels",
            3,
            30000,
            Some("17 inch alloy wheel set".into()),
        ));

        let catalog = service.modification_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Alloy wheels");
        assert_eq!(catalog[1].name, "Spoiler");
    }
}
