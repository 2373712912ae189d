pub mod service;

pub use service::{PaymentGateway, PaymentIntent, PaymentService};
