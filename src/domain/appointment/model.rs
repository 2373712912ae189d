//! Appointment domain entity

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Whether the appointment occupies a discrete slot or a full-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Bound to exactly one time slot
    Service,
    /// Full-day window (shop opening to closing), no slot
    Modification,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Modification => "Modification",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Service" => Some(Self::Service),
            "Modification" => Some(Self::Modification),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Appointment workflow status.
///
/// New appointments always start as `Pending`. Transition legality is not
/// enforced on updates — callers are trusted to send sensible transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Delivered,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delivered => "Delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A workshop service or modification appointment.
///
/// Invariant: `Service` appointments carry `time_slot_id = Some(..)` and the
/// referenced slot's owner equals this appointment's id; `Modification`
/// appointments carry no slot and span the shop's full working day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment ID (empty until first persisted)
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Free-text vehicle descriptor ("Toyota Corolla 2018, CAB-1234")
    pub vehicle: String,
    pub service_kind: ServiceKind,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    /// Positionally paired with `assigned_employee_names`
    pub assigned_employee_ids: Vec<String>,
    pub assigned_employee_names: Vec<String>,
    /// Requested modification line items (Modification kind)
    pub modifications: Vec<String>,
    pub estimated_cost: Option<f64>,
    /// Linked slot (Service kind only)
    pub time_slot_id: Option<String>,
}

impl Appointment {
    /// Replace both employee lists and force status to `Approved`.
    pub fn assign_employees(&mut self, ids: Vec<String>, names: Vec<String>) {
        self.assigned_employee_ids = ids;
        self.assigned_employee_names = names;
        self.status = AppointmentStatus::Approved;
    }

    /// True for appointments bound to a discrete slot.
    pub fn is_slot_bound(&self) -> bool {
        self.service_kind == ServiceKind::Service
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_appointment() -> Appointment {
        Appointment {
            id: "appt-1".into(),
            customer_id: "cust-1".into(),
            customer_name: "Nimal Perera".into(),
            customer_email: "nimal@example.com".into(),
            vehicle: "Toyota Corolla 2018".into(),
            service_kind: ServiceKind::Service,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            assigned_employee_ids: vec![],
            assigned_employee_names: vec![],
            modifications: vec![],
            estimated_cost: Some(15000.0),
            time_slot_id: Some("slot-1".into()),
        }
    }

    #[test]
    fn assign_employees_forces_approved() {
        let mut appt = sample_appointment();
        appt.assign_employees(
            vec!["e1".into(), "e2".into()],
            vec!["Kasun".into(), "Ruwan".into()],
        );
        assert_eq!(appt.status, AppointmentStatus::Approved);
        assert_eq!(appt.assigned_employee_ids, vec!["e1", "e2"]);
        assert_eq!(appt.assigned_employee_names, vec!["Kasun", "Ruwan"]);
    }

    #[test]
    fn assign_employees_replaces_previous_lists() {
        let mut appt = sample_appointment();
        appt.assign_employees(vec!["e1".into()], vec!["Kasun".into()]);
        appt.assign_employees(vec!["e3".into()], vec!["Saman".into()]);
        assert_eq!(appt.assigned_employee_ids, vec!["e3"]);
        assert_eq!(appt.assigned_employee_names, vec!["Saman"]);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            AppointmentStatus::Pending,
            AppointmentStatus::Approved,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Delivered,
        ] {
            let parsed = AppointmentStatus::parse(status.as_str());
            assert_eq!(parsed, Some(*status));
        }
    }

    #[test]
    fn in_progress_uses_spaced_form() {
        assert_eq!(AppointmentStatus::InProgress.as_str(), "In Progress");
        assert_eq!(
            AppointmentStatus::parse("In Progress"),
            Some(AppointmentStatus::InProgress)
        );
    }

    #[test]
    fn unknown_status_rejected() {
        assert_eq!(AppointmentStatus::parse("Cancelled"), None);
    }

    #[test]
    fn service_kind_roundtrip() {
        assert_eq!(ServiceKind::parse("Service"), Some(ServiceKind::Service));
        assert_eq!(
            ServiceKind::parse("Modification"),
            Some(ServiceKind::Modification)
        );
        assert_eq!(ServiceKind::parse("Repair"), None);
    }
}
