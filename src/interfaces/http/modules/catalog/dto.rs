//! Modification catalog DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ModificationItem;

/// Catalog entry in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ModificationItemDto {
    pub id: String,
    pub name: String,
    pub estimated_hours: u32,
    /// Price per unit in LKR
    pub unit_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<ModificationItem> for ModificationItemDto {
    fn from(i: ModificationItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            estimated_hours: i.estimated_hours,
            unit_price: i.unit_price,
            description: i.description,
        }
    }
}
