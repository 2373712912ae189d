//! Shared support types: errors and shutdown coordination.

pub mod errors;
pub mod shutdown;

pub use errors::{AppError, DomainError, InfraError};
pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
