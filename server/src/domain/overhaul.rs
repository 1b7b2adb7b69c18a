//! Overhaul Entity
//!
//! A field overhaul job with its location, estimated completion date, progress
//! and a history log. References to personnel and inventory are plain ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use super::entity::{check_range, DomainResult, Entity, RequiredFields, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: u32,
    pub timestamp: Option<DateTime<Utc>>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overhaul {
    pub id: u32,
    pub name: String,
    #[serde(rename = "lokasi")]
    pub location: String,
    pub status: String,
    #[serde(rename = "estimasi")]
    pub estimate: Option<NaiveDate>,
    pub progress: i64,
    pub personalia_id: Option<u32>,
    pub inventory_id: Option<u32>,
    pub history: Vec<HistoryEntry>,
}

impl Entity for Overhaul {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for Overhaul {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("name", &self.name)
            .text("lokasi", &self.location)
            .text("status", &self.status)
            .present("estimasi", &self.estimate)
            .finish()?;
        check_range("progress", self.progress, 0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_wire_names() {
        let json = r#"{"name":"Point Machine","lokasi":"Stasiun Bandung","status":"Proses",
            "estimasi":"2024-09-01","progress":40,"personalia_id":3}"#;
        let o: Overhaul = serde_json::from_str(json).unwrap();
        assert_eq!(o.location, "Stasiun Bandung");
        assert_eq!(o.personalia_id, Some(3));
        assert_eq!(o.inventory_id, None);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_progress_out_of_range() {
        let o = Overhaul {
            name: "x".into(),
            location: "y".into(),
            status: "z".into(),
            estimate: NaiveDate::from_ymd_opt(2024, 1, 1),
            progress: 120,
            ..Default::default()
        };
        assert!(o.validate().is_err());
    }
}
