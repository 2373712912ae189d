//! Application services composing the domain layer.

pub mod booking;
pub mod payments;

pub use booking::{BookingCheck, BookingService, CustomerIdentity, NewAppointment};
pub use payments::{PaymentGateway, PaymentIntent, PaymentService};
