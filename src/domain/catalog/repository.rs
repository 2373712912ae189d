//! Modification catalog interface

use async_trait::async_trait;

use super::model::ModificationItem;
use crate::domain::DomainResult;

/// Read model over the workshop's modification offerings. The catalog is
/// curated by admin tooling; the booking side only lists it.
#[async_trait]
pub trait ModificationItemRepository: Send + Sync {
    /// All catalog items.
    async fn find_all(&self) -> DomainResult<Vec<ModificationItem>>;

    /// Find one item by ID.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ModificationItem>>;
}
