//! Inventory Entity
//!
//! A stocked part or tool with its storage location and availability status.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity, RequiredFields, Validate};

/// Status values the dashboard offers for inventory items
pub const INVENTORY_STATUSES: &[&str] = &[
    "Tersedia",
    "Limit",
    "Tidak Tersedia",
    "Diproduksi",
    "Overhaul",
    "Rekayasa",
    "Perbaikan",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u32,
    pub name: String,
    pub quantity: i64,
    pub location: String,
    pub status: String,
    pub item_code: String,
}

impl InventoryItem {
    pub fn new(name: &str, quantity: i64, location: &str, status: &str, item_code: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            quantity,
            location: location.to_string(),
            status: status.to_string(),
            item_code: item_code.to_string(),
        }
    }
}

impl Entity for InventoryItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for InventoryItem {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("name", &self.name)
            .text("location", &self.location)
            .text("status", &self.status)
            .text("itemCode", &self.item_code)
            .finish()?;
        if self.quantity <= 0 {
            return Err(DomainError::InvalidInput("quantity must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let item = InventoryItem::new("Relay", 4, "Gudang A", "Tersedia", "INV-01");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemCode"], "INV-01");
        assert!(json.get("item_code").is_none());
    }

    #[test]
    fn test_missing_fields_deserialize_empty_and_fail_validation() {
        let item: InventoryItem = serde_json::from_str(r#"{"name":"Relay"}"#).unwrap();
        assert_eq!(item.quantity, 0);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let item = InventoryItem::new("Relay", 0, "Gudang A", "Tersedia", "INV-01");
        assert!(matches!(item.validate(), Err(DomainError::InvalidInput(_))));
        let item = InventoryItem::new("Relay", 1, "Gudang A", "Tersedia", "INV-01");
        assert!(item.validate().is_ok());
    }
}
