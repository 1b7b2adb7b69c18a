//! Production Run Entity
//!
//! A production order with its target, assigned personnel (by NIP), consumed
//! materials and dated progress notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity, RequiredFields, Validate};

/// Status of a finished production run
pub const PRODUCTION_DONE: &str = "Selesai";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub qty: i64,
    #[serde(rename = "harga")]
    pub price: f64,
    pub satuan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressEntry {
    pub id: u32,
    pub date: Option<NaiveDate>,
    pub completed: i64,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionRun {
    pub id: u32,
    pub name: String,
    pub target: i64,
    pub completed: i64,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// NIPs of assigned personnel
    pub personnel: Vec<String>,
    pub materials: Vec<Material>,
    pub progress: Vec<ProgressEntry>,
}

impl ProductionRun {
    /// Completion percentage, capped at 100
    pub fn progress_percentage(&self) -> i64 {
        if self.target <= 0 {
            return 0;
        }
        let pct = (self.completed as f64 / self.target as f64 * 100.0).round() as i64;
        pct.min(100)
    }

    /// Total material cost (qty × price)
    pub fn material_cost(&self) -> f64 {
        self.materials.iter().map(|m| m.qty as f64 * m.price).sum()
    }
}

impl Entity for ProductionRun {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for ProductionRun {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("name", &self.name)
            .present("startDate", &self.start_date)
            .present("endDate", &self.end_date)
            .finish()?;
        if self.target <= 0 {
            return Err(DomainError::InvalidInput("target must be greater than 0".to_string()));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(DomainError::InvalidInput("endDate is before startDate".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> ProductionRun {
        ProductionRun {
            name: "Radio Lokomotif".to_string(),
            target: 120,
            completed: 82,
            status: "Dalam Proses".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_percentage_rounds_and_caps() {
        let mut r = run();
        assert_eq!(r.progress_percentage(), 68);
        r.completed = 500;
        assert_eq!(r.progress_percentage(), 100);
        r.target = 0;
        assert_eq!(r.progress_percentage(), 0);
    }

    #[test]
    fn test_materials_use_harga_and_satuan_keys() {
        let json = r#"{"name":"x","target":1,"startDate":"2024-01-01","endDate":"2024-01-02",
            "materials":[{"id":1,"name":"Kabel","qty":3,"harga":2.5,"satuan":"m"}]}"#;
        let r: ProductionRun = serde_json::from_str(json).unwrap();
        assert_eq!(r.materials[0].price, 2.5);
        assert_eq!(r.material_cost(), 7.5);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_target_and_reversed_dates() {
        let mut r = run();
        r.target = 0;
        assert!(r.validate().is_err());

        let mut r = run();
        r.end_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(r.validate().is_err());
    }
}
