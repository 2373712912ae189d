//! Modification catalog entry

use serde::{Deserialize, Serialize};

/// A modification the workshop offers, shown to customers when they put
/// together a modification booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationItem {
    /// Unique item ID
    pub id: String,
    pub name: String,
    pub estimated_hours: u32,
    /// Price per unit in LKR
    pub unit_price: i64,
    pub description: Option<String>,
}

impl ModificationItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        estimated_hours: u32,
        unit_price: i64,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            estimated_hours,
            unit_price,
            description,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_all_fields() {
        let item = ModificationItem::new(
            "mod-1",
            "Body kit",
            6,
            45000,
            Some("Full aerodynamic body kit".into()),
        );
        assert_eq!(item.id, "mod-1");
        assert_eq!(item.name, "Body kit");
        assert_eq!(item.estimated_hours, 6);
        assert_eq!(item.unit_price, 45000);
        assert!(item.description.is_some());
    }
}
