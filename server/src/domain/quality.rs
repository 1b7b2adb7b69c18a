//! Quality Control Entity
//!
//! QC results are either stored directly or derived at list time from
//! production runs and overhauls. Each row carries a display code of the form
//! `PREFIX-N` where the prefix names the department.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::entity::{DomainError, DomainResult, Entity, RequiredFields, Validate};
use super::overhaul::Overhaul;
use super::production::{ProductionRun, PRODUCTION_DONE};

/// QC status for a passed check
pub const QC_PASSED: &str = "Lulus";

/// Departments a QC result can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Production,
    Overhaul,
    Rekayasa,
    Kalibrasi,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Production,
        Department::Overhaul,
        Department::Rekayasa,
        Department::Kalibrasi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Production => "Production",
            Department::Overhaul => "Overhaul",
            Department::Rekayasa => "Rekayasa",
            Department::Kalibrasi => "Kalibrasi",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Department::Production => "PRD",
            Department::Overhaul => "OVH",
            Department::Rekayasa => "RKY",
            Department::Kalibrasi => "KAL",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let upper = prefix.to_ascii_uppercase();
        Self::ALL.into_iter().find(|d| d.prefix() == upper)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Guess a department from keywords in a product name
    pub fn from_product_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if has(&["overhaul", "point machine"]) {
            Some(Department::Overhaul)
        } else if has(&["radio lokomotif", "way station", "sentranik"]) {
            Some(Department::Production)
        } else if has(&["control panel", "signal system"]) {
            Some(Department::Rekayasa)
        } else if has(&["battery pack", "cable set", "kalibrasi"]) {
            Some(Department::Kalibrasi)
        } else {
            None
        }
    }
}

/// Where a QC row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QcSource {
    #[default]
    Qc,
    Produksi,
    Overhaul,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityCheck {
    /// Display code, e.g. `PRD-12`
    #[serde(rename = "id")]
    pub code: String,
    pub qc_id: u32,
    #[serde(rename = "product")]
    pub product_name: String,
    #[serde(rename = "batch")]
    pub batch_code: String,
    pub status: String,
    #[serde(rename = "tested")]
    pub tested_count: i64,
    #[serde(rename = "passed")]
    pub passed_count: i64,
    pub date: Option<NaiveDate>,
    pub department: Option<Department>,
    #[serde(rename = "passRate")]
    pub pass_rate: i64,
    pub source: QcSource,
    pub produksi_id: Option<u32>,
    pub overhaul_id: Option<u32>,
}

/// Percentage of passed over tested, rounded half up; 0 when nothing was tested
pub fn pass_rate(passed: i64, tested: i64) -> i64 {
    if tested <= 0 {
        return 0;
    }
    (passed as f64 / tested as f64 * 100.0 + 0.5).floor() as i64
}

/// Build a display code from a department and numeric id
pub fn make_code(department: Option<Department>, id: u32) -> String {
    let prefix = department.map(|d| d.prefix()).unwrap_or("QC");
    format!("{}-{}", prefix, id)
}

/// Split a display code into its prefix and numeric part
pub fn parse_code(code: &str) -> DomainResult<(String, u32)> {
    static CODE: OnceLock<Regex> = OnceLock::new();
    let re = CODE.get_or_init(|| Regex::new(r"^([A-Za-z]+)-(\d+)$").expect("valid code pattern"));
    let caps = re
        .captures(code.trim())
        .ok_or_else(|| DomainError::InvalidInput(format!("invalid QC code: {}", code)))?;
    let number = caps[2]
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidInput(format!("invalid numeric part in QC code: {}", code)))?;
    Ok((caps[1].to_string(), number))
}

impl QualityCheck {
    /// Recompute the derived fields (code and pass rate)
    pub fn refresh(&mut self) {
        if self.source == QcSource::Qc {
            self.code = make_code(self.department, self.qc_id);
        }
        self.pass_rate = pass_rate(self.passed_count, self.tested_count);
    }

    /// QC view of a production run
    pub fn from_production(run: &ProductionRun) -> Self {
        let year = run
            .start_date
            .map(|d| d.format("%Y").to_string())
            .unwrap_or_else(|| "0000".to_string());
        let mut qc = Self {
            code: format!("{}-{}", Department::Production.prefix(), run.id),
            qc_id: run.id,
            product_name: run.name.clone(),
            batch_code: format!("BATCH-{}-{}", year, run.id),
            status: map_done_status(&run.status),
            tested_count: run.target,
            passed_count: run.completed,
            date: run.end_date,
            department: Some(Department::from_product_name(&run.name).unwrap_or(Department::Production)),
            pass_rate: 0,
            source: QcSource::Produksi,
            produksi_id: Some(run.id),
            overhaul_id: None,
        };
        qc.refresh();
        qc
    }

    /// QC view of an overhaul job; progress is measured out of 100
    pub fn from_overhaul(overhaul: &Overhaul) -> Self {
        let year = overhaul
            .estimate
            .map(|d| d.format("%Y").to_string())
            .unwrap_or_else(|| "0000".to_string());
        let mut qc = Self {
            code: format!("{}-{}", Department::Overhaul.prefix(), overhaul.id),
            qc_id: overhaul.id,
            product_name: overhaul.name.clone(),
            batch_code: format!("BATCH-{}-{}", year, overhaul.id),
            status: map_done_status(&overhaul.status),
            tested_count: 100,
            passed_count: overhaul.progress,
            date: overhaul.estimate,
            department: Some(Department::from_product_name(&overhaul.name).unwrap_or(Department::Overhaul)),
            pass_rate: 0,
            source: QcSource::Overhaul,
            produksi_id: None,
            overhaul_id: Some(overhaul.id),
        };
        qc.refresh();
        qc
    }
}

fn map_done_status(status: &str) -> String {
    if status == PRODUCTION_DONE {
        QC_PASSED.to_string()
    } else {
        status.to_string()
    }
}

impl Entity for QualityCheck {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.qc_id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.qc_id = id;
    }
}

impl Validate for QualityCheck {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("product", &self.product_name)
            .text("batch", &self.batch_code)
            .text("status", &self.status)
            .present("department", &self.department)
            .present("date", &self.date)
            .finish()?;
        if self.tested_count < 0 || self.passed_count < 0 {
            return Err(DomainError::InvalidInput("counts must not be negative".to_string()));
        }
        if self.passed_count > self.tested_count {
            return Err(DomainError::InvalidInput(
                "passed count must not exceed tested count".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_rate_rounds_half_up() {
        assert_eq!(pass_rate(1, 8), 13); // 12.5
        assert_eq!(pass_rate(82, 120), 68);
        assert_eq!(pass_rate(5, 0), 0);
        assert_eq!(pass_rate(10, 10), 100);
    }

    #[test]
    fn test_code_roundtrip_and_prefix_lookup() {
        assert_eq!(make_code(Some(Department::Kalibrasi), 4), "KAL-4");
        assert_eq!(make_code(None, 9), "QC-9");
        let (prefix, n) = parse_code("ovh-12").unwrap();
        assert_eq!(Department::from_prefix(&prefix), Some(Department::Overhaul));
        assert_eq!(n, 12);
        assert!(parse_code("PRD12").is_err());
        assert!(parse_code("PRD-x").is_err());
    }

    #[test]
    fn test_product_name_heuristic() {
        assert_eq!(Department::from_product_name("Overhaul Point Machine"), Some(Department::Overhaul));
        assert_eq!(Department::from_product_name("Radio Lokomotif V2"), Some(Department::Production));
        assert_eq!(Department::from_product_name("Control Panel"), Some(Department::Rekayasa));
        assert_eq!(Department::from_product_name("Battery Pack"), Some(Department::Kalibrasi));
        assert_eq!(Department::from_product_name("Gearbox"), None);
    }

    #[test]
    fn test_derived_from_production_run() {
        let run = ProductionRun {
            id: 7,
            name: "Way Station".into(),
            target: 50,
            completed: 45,
            status: PRODUCTION_DONE.into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 30),
            ..Default::default()
        };
        let qc = QualityCheck::from_production(&run);
        assert_eq!(qc.code, "PRD-7");
        assert_eq!(qc.batch_code, "BATCH-2024-7");
        assert_eq!(qc.status, QC_PASSED);
        assert_eq!(qc.pass_rate, 90);
        assert_eq!(qc.source, QcSource::Produksi);
        assert_eq!(qc.date, run.end_date);
    }

    #[test]
    fn test_derived_from_overhaul_defaults_department() {
        let o = Overhaul {
            id: 3,
            name: "Gearbox".into(),
            status: "Proses".into(),
            estimate: NaiveDate::from_ymd_opt(2025, 1, 15),
            progress: 40,
            ..Default::default()
        };
        let qc = QualityCheck::from_overhaul(&o);
        assert_eq!(qc.department, Some(Department::Overhaul));
        assert_eq!(qc.tested_count, 100);
        assert_eq!(qc.pass_rate, 40);
        assert_eq!(qc.status, "Proses");
    }

    #[test]
    fn test_passed_cannot_exceed_tested() {
        let qc = QualityCheck {
            product_name: "Cable Set".into(),
            batch_code: "B-1".into(),
            status: QC_PASSED.into(),
            tested_count: 5,
            passed_count: 6,
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            department: Some(Department::Kalibrasi),
            ..Default::default()
        };
        assert!(qc.validate().is_err());
    }

    #[test]
    fn test_unknown_department_is_rejected_on_deserialize() {
        let res: Result<QualityCheck, _> = serde_json::from_str(r#"{"department":"Marketing"}"#);
        assert!(res.is_err());
    }
}
