//! # Revamp Booking Service
//!
//! Appointment and time-slot allocation engine for a vehicle workshop.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, calendar policy and repository traits
//! - **application**: Booking orchestration and payment linkage
//! - **infrastructure**: Storage and payment-gateway adapters
//! - **auth**: JWT identity extraction at the boundary
//! - **interfaces**: REST API with Swagger documentation
//!
//! The one hard correctness requirement lives in the slot claim: of N
//! concurrent bookings targeting the same slot, exactly one succeeds.

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the storage and gateway adapters for easy access
pub use infrastructure::{InMemoryStore, StripeGateway};

// Re-export the router
pub use interfaces::http::{create_router, BookingUnifiedState};
