//! Calibration Entity
//!
//! Tracks a measuring tool through the five calibration steps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use super::entity::{check_range, DomainResult, Entity, RequiredFields, Validate};

/// Number of steps in the calibration workflow
pub const CALIBRATION_STEPS: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Calibration {
    pub id: u32,
    /// Tool name
    pub name: String,
    pub status: String,
    /// Completed step, 0..=5
    pub progress: i64,
    pub due_date: Option<NaiveDate>,
    /// Set by the server on every write
    pub last_update: Option<DateTime<Utc>>,
}

impl Calibration {
    /// True when the due date has passed and the workflow is unfinished
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.progress < CALIBRATION_STEPS,
            None => false,
        }
    }
}

impl Entity for Calibration {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for Calibration {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("name", &self.name)
            .text("status", &self.status)
            .present("dueDate", &self.due_date)
            .finish()?;
        check_range("progress", self.progress, 0, CALIBRATION_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibration(progress: i64) -> Calibration {
        Calibration {
            name: "Multimeter".into(),
            status: "Proses".into(),
            progress,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_limited_to_five_steps() {
        assert!(calibration(5).validate().is_ok());
        assert!(calibration(6).validate().is_err());
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(calibration(2).is_overdue(today));
        assert!(!calibration(5).is_overdue(today));
    }
}
