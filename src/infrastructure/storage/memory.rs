//! In-memory store for development and testing
//!
//! Backs all three repository traits with `DashMap`s. The slot `claim`
//! relies on `DashMap::get_mut` holding the entry's shard lock for the
//! duration of the check-and-set, which makes the available→booked
//! transition a single conditional update: of N concurrent claimers for one
//! slot, exactly one observes `is_available == true`.
//!
//! A database-backed implementation must provide the same guarantee with a
//! conditional write (e.g. `findAndModify` filtered on availability); a
//! read-then-write pair would reintroduce double-booking.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use crate::domain::calendar::BlackoutSource;
use crate::domain::{
    Appointment, AppointmentRepository, DomainError, DomainResult, ModificationItem,
    ModificationItemRepository, RepositoryProvider, TimeSlot, TimeSlotRepository,
};

/// In-memory storage for all booking aggregates.
pub struct InMemoryStore {
    appointments: DashMap<String, Appointment>,
    slots: DashMap<String, TimeSlot>,
    blackout_dates: DashSet<NaiveDate>,
    modification_items: DashMap<String, ModificationItem>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            appointments: DashMap::new(),
            slots: DashMap::new(),
            blackout_dates: DashSet::new(),
            modification_items: DashMap::new(),
        }
    }

    /// Put an item into the modification catalog.
    pub fn add_modification_item(&self, item: ModificationItem) {
        self.modification_items.insert(item.id.clone(), item);
    }

    /// Mark a date as holiday/maintenance blackout.
    pub fn add_blackout(&self, date: NaiveDate) {
        self.blackout_dates.insert(date);
    }

    /// Seed the standard slot batch for one date: 08–11, 11–14, 14–17.
    ///
    /// Stands in for the external scheduling job that creates slots in
    /// production. Returns the new slot IDs in start-time order.
    pub fn seed_day(&self, date: NaiveDate) -> Vec<String> {
        const WINDOWS: [(u32, u32); 3] = [(8, 11), (11, 14), (14, 17)];

        WINDOWS
            .iter()
            .map(|&(from, to)| {
                let id = Uuid::new_v4().to_string();
                let slot = TimeSlot::new(
                    id.clone(),
                    date,
                    NaiveTime::from_hms_opt(from, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(to, 0, 0).unwrap(),
                );
                self.slots.insert(id.clone(), slot);
                id
            })
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn save(&self, mut appointment: Appointment) -> DomainResult<Appointment> {
        if appointment.id.is_empty() {
            appointment.id = Uuid::new_v4().to_string();
        }
        self.appointments
            .insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Appointment>> {
        Ok(self.appointments.get(id).map(|a| a.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Appointment>> {
        Ok(self.appointments.iter().map(|a| a.clone()).collect())
    }

    async fn find_by_customer(&self, customer_id: &str) -> DomainResult<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .map(|a| a.clone())
            .collect())
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Appointment>> {
        let mut matched: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date >= start && a.date <= end)
            .map(|a| a.clone())
            .collect();
        matched.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        Ok(matched)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.appointments.remove(id);
        Ok(())
    }
}

#[async_trait]
impl TimeSlotRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TimeSlot>> {
        Ok(self.slots.get(id).map(|s| s.clone()))
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<TimeSlot>> {
        let mut slots: Vec<TimeSlot> = self
            .slots
            .iter()
            .filter(|s| s.date == date)
            .map(|s| s.clone())
            .collect();
        slots.sort_by_key(|s| s.start_time);
        Ok(slots)
    }

    async fn save(&self, slot: TimeSlot) -> DomainResult<()> {
        self.slots.insert(slot.id.clone(), slot);
        Ok(())
    }

    async fn claim(&self, id: &str, appointment_id: &str) -> DomainResult<TimeSlot> {
        // get_mut holds the entry lock across the check and the set, so the
        // availability test and the booking are one atomic step.
        let mut slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("TimeSlot", "id", id))?;

        if !slot.is_available {
            return Err(DomainError::Conflict(format!(
                "Time slot {} is already booked",
                id
            )));
        }

        slot.claim(appointment_id);
        Ok(slot.clone())
    }

    async fn release(&self, id: &str) -> DomainResult<TimeSlot> {
        let mut slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("TimeSlot", "id", id))?;

        // No-op success on an already-free slot: cancellation can race with
        // external cleanup.
        if !slot.is_available {
            slot.release();
        }
        Ok(slot.clone())
    }
}

#[async_trait]
impl BlackoutSource for InMemoryStore {
    async fn is_blackout(&self, date: NaiveDate) -> DomainResult<bool> {
        Ok(self.blackout_dates.contains(&date))
    }
}

#[async_trait]
impl ModificationItemRepository for InMemoryStore {
    async fn find_all(&self) -> DomainResult<Vec<ModificationItem>> {
        let mut items: Vec<ModificationItem> = self
            .modification_items
            .iter()
            .map(|i| i.clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ModificationItem>> {
        Ok(self.modification_items.get(id).map(|i| i.clone()))
    }
}

impl RepositoryProvider for InMemoryStore {
    fn appointments(&self) -> &dyn AppointmentRepository {
        self
    }

    fn slots(&self) -> &dyn TimeSlotRepository {
        self
    }

    fn blackouts(&self) -> &dyn BlackoutSource {
        self
    }

    fn modification_items(&self) -> &dyn ModificationItemRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn seed_day_creates_three_ordered_slots() {
        let store = InMemoryStore::new();
        let ids = store.seed_day(monday());
        assert_eq!(ids.len(), 3);

        let slots = TimeSlotRepository::find_by_date(&store, monday())
            .await
            .unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(slots[2].end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert!(slots.iter().all(|s| s.is_available));
    }

    #[tokio::test]
    async fn claim_books_exactly_once() {
        let store = InMemoryStore::new();
        let ids = store.seed_day(monday());

        let slot = store.claim(&ids[0], "appt-1").await.unwrap();
        assert!(!slot.is_available);
        assert_eq!(slot.appointment_id.as_deref(), Some("appt-1"));

        let err = store.claim(&ids[0], "appt-2").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn claim_unknown_slot_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.claim("missing", "appt-1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn release_is_idempotent_and_slot_reusable() {
        let store = InMemoryStore::new();
        let ids = store.seed_day(monday());

        store.claim(&ids[1], "appt-1").await.unwrap();
        let released = store.release(&ids[1]).await.unwrap();
        assert!(released.is_available);
        assert!(released.appointment_id.is_none());

        // Second release is a no-op success
        let again = store.release(&ids[1]).await.unwrap();
        assert!(again.is_available);

        // And the slot can be claimed again
        let reclaimed = store.claim(&ids[1], "appt-2").await.unwrap();
        assert_eq!(reclaimed.appointment_id.as_deref(), Some("appt-2"));
    }

    #[tokio::test]
    async fn concurrent_claims_yield_one_winner() {
        let store = Arc::new(InMemoryStore::new());
        let ids = store.seed_day(monday());
        let slot_id = ids[0].clone();

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            let slot_id = slot_id.clone();
            handles.push(tokio::spawn(async move {
                store.claim(&slot_id, &format!("appt-{}", i)).await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 31);

        let slot = TimeSlotRepository::find_by_id(&*store, &slot_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!slot.is_available);
        assert!(slot.is_consistent());
    }

    #[tokio::test]
    async fn save_assigns_id_on_first_insert() {
        let store = InMemoryStore::new();
        let appt = Appointment {
            id: String::new(),
            customer_id: "cust-1".into(),
            customer_name: "Nimal".into(),
            customer_email: "nimal@example.com".into(),
            vehicle: "Honda Civic".into(),
            service_kind: crate::domain::ServiceKind::Modification,
            date: monday(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            status: crate::domain::AppointmentStatus::Pending,
            assigned_employee_ids: vec![],
            assigned_employee_names: vec![],
            modifications: vec!["Body kit".into()],
            estimated_cost: None,
            time_slot_id: None,
        };

        let saved = AppointmentRepository::save(&store, appt).await.unwrap();
        assert!(!saved.id.is_empty());

        let found = AppointmentRepository::find_by_id(&store, &saved.id)
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn date_range_is_inclusive_and_ordered() {
        let store = InMemoryStore::new();
        let d1 = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        for (i, (date, hour)) in [(d2, 14), (d1, 8), (d3, 8), (d1, 11)].iter().enumerate() {
            let appt = Appointment {
                id: format!("appt-{}", i),
                customer_id: "cust-1".into(),
                customer_name: "Nimal".into(),
                customer_email: "nimal@example.com".into(),
                vehicle: "Honda Civic".into(),
                service_kind: crate::domain::ServiceKind::Service,
                date: *date,
                start_time: NaiveTime::from_hms_opt(*hour, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(hour + 3, 0, 0).unwrap(),
                status: crate::domain::AppointmentStatus::Pending,
                assigned_employee_ids: vec![],
                assigned_employee_names: vec![],
                modifications: vec![],
                estimated_cost: None,
                time_slot_id: Some(format!("slot-{}", i)),
            };
            AppointmentRepository::save(&store, appt).await.unwrap();
        }

        let in_range = store.find_by_date_range(d1, d2).await.unwrap();
        assert_eq!(in_range.len(), 3); // both bounds inclusive, d3 excluded
        assert_eq!(in_range[0].date, d1);
        assert_eq!(in_range[0].start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(in_range[1].start_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert_eq!(in_range[2].date, d2);
    }

    #[tokio::test]
    async fn catalog_lists_items_sorted_by_name() {
        let store = InMemoryStore::new();
        store.add_modification_item(ModificationItem::new(
            "mod-2",
            "Spoiler",
            2,
            12000,
            None,
        ));
        store.add_modification_item(ModificationItem::new(
            "mod-1",
            "Body kit",
            6,
            45000,
            Some("Full aerodynamic body kit".into()),
        ));

        let items = ModificationItemRepository::find_all(&store).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Body kit");
        assert_eq!(items[1].name, "Spoiler");

        let found = ModificationItemRepository::find_by_id(&store, "mod-2")
            .await
            .unwrap();
        assert_eq!(found.unwrap().unit_price, 12000);
    }

    #[tokio::test]
    async fn delete_missing_is_noop() {
        let store = InMemoryStore::new();
        AppointmentRepository::delete(&store, "no-such-id")
            .await
            .unwrap();
    }
}
