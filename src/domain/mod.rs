pub mod appointment;
pub mod calendar;
pub mod catalog;
pub mod repositories;
pub mod slot;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentRepository, AppointmentStatus, ServiceKind};
pub use calendar::BlackoutSource;
pub use catalog::{ModificationItem, ModificationItemRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use slot::{TimeSlot, TimeSlotRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
