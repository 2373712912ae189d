pub mod service;

pub use service::{BookingCheck, BookingService, CustomerIdentity, NewAppointment};
