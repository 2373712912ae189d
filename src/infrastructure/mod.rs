//! External-facing adapters: storage and the payment gateway client.

pub mod payment;
pub mod storage;

pub use payment::StripeGateway;
pub use storage::InMemoryStore;
