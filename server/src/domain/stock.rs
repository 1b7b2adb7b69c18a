//! Stock Entity
//!
//! Finished or staged stock produced by a production run, optionally tied to an
//! inventory item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity, RequiredFields, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockEntry {
    pub id: u32,
    pub item_name: String,
    pub quantity: i64,
    pub location: String,
    pub status: String,
    /// Set by the server on every write
    pub last_update: Option<DateTime<Utc>>,
    #[serde(rename = "inventory_id")]
    pub inventory_id: Option<u32>,
    #[serde(rename = "produksi_id")]
    pub produksi_id: Option<u32>,
}

impl Entity for StockEntry {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for StockEntry {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("itemName", &self.item_name)
            .text("location", &self.location)
            .text("status", &self.status)
            .finish()?;
        if self.quantity < 0 {
            return Err(DomainError::InvalidInput("quantity must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantity_is_allowed() {
        let s = StockEntry {
            item_name: "Relay".into(),
            location: "Rak 2".into(),
            status: "Ready".into(),
            ..Default::default()
        };
        assert!(s.validate().is_ok());
        let s = StockEntry { quantity: -1, ..s };
        assert!(s.validate().is_err());
    }
}
