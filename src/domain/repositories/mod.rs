//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::appointment::AppointmentRepository;
use super::calendar::BlackoutSource;
use super::catalog::ModificationItemRepository;
use super::slot::TimeSlotRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let appt = repos.appointments().find_by_id("a1").await?;
///     let slot = repos.slots().find_by_id("s1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn appointments(&self) -> &dyn AppointmentRepository;
    fn slots(&self) -> &dyn TimeSlotRepository;
    fn blackouts(&self) -> &dyn BlackoutSource;
    fn modification_items(&self) -> &dyn ModificationItemRepository;
}
