//! Data Models
//!
//! Frontend mirrors of the backend wire types. Dates are kept as the
//! `YYYY-MM-DD` strings the API sends; timestamps as RFC 3339 strings.

use serde::{Deserialize, Serialize};

use crate::crud::{Checks, FieldError, Record, SortValue, Validate};

fn num(value: impl Into<f64>) -> SortValue {
    SortValue::Number(value.into())
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ========================
// Inventory
// ========================

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

impl Record for InventoryItem {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.item_code.clone(),
            self.name.clone(),
            self.quantity.to_string(),
            self.location.clone(),
            self.status.clone(),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "quantity" => num(self.quantity as f64),
            "location" => SortValue::text(&self.location),
            "status" => SortValue::text(&self.status),
            "itemCode" => SortValue::text(&self.item_code),
            _ => SortValue::text(&self.name),
        }
    }
}

impl Validate for InventoryItem {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("itemCode", "Kode barang", &self.item_code)
            .text("name", "Nama", &self.name)
            .check(self.quantity > 0, "quantity", "Jumlah harus lebih dari 0")
            .text("location", "Lokasi", &self.location)
            .text("status", "Status", &self.status)
            .finish()
    }
}

// ========================
// Production
// ========================

pub const PRODUCTION_STATUSES: &[&str] = &["Perencanaan", "Proses", "Selesai", "Tertunda"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub qty: i64,
    pub harga: f64,
    pub satuan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressEntry {
    pub id: u32,
    pub date: Option<String>,
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
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub personnel: Vec<String>,
    pub materials: Vec<Material>,
    pub progress: Vec<ProgressEntry>,
}

impl ProductionRun {
    pub fn percentage(&self) -> i64 {
        if self.target <= 0 {
            return 0;
        }
        let pct = (self.completed as f64 / self.target as f64 * 100.0).round() as i64;
        pct.clamp(0, 100)
    }

    pub fn material_cost(&self) -> f64 {
        self.materials.iter().map(|m| m.qty as f64 * m.harga).sum()
    }
}

impl Record for ProductionRun {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.name.clone(),
            self.status.clone(),
            opt_text(&self.start_date),
            opt_text(&self.end_date),
        ];
        fields.extend(self.personnel.iter().cloned());
        fields
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "target" => num(self.target as f64),
            "completed" => num(self.completed as f64),
            "progress" => num(self.percentage() as f64),
            "status" => SortValue::text(&self.status),
            "startDate" => SortValue::text(&opt_text(&self.start_date)),
            "endDate" => SortValue::text(&opt_text(&self.end_date)),
            _ => SortValue::text(&self.name),
        }
    }
}

impl Validate for ProductionRun {
    fn validate(&self) -> Vec<FieldError> {
        let ordered = match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => end >= start,
            _ => true,
        };
        Checks::new()
            .text("name", "Nama produk", &self.name)
            .check(self.target > 0, "target", "Target harus lebih dari 0")
            .date("startDate", "Tanggal mulai", &self.start_date)
            .date("endDate", "Tanggal selesai", &self.end_date)
            .check(ordered, "endDate", "Tanggal selesai tidak boleh sebelum tanggal mulai")
            .finish()
    }
}

// ========================
// Overhaul
// ========================

pub const OVERHAUL_STATUSES: &[&str] = &["Menunggu", "Proses", "Selesai"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overhaul {
    pub id: u32,
    pub name: String,
    pub lokasi: String,
    pub status: String,
    pub estimasi: Option<String>,
    pub progress: i64,
    pub personalia_id: Option<u32>,
    pub inventory_id: Option<u32>,
    pub history: Vec<HistoryEntry>,
}

impl Record for Overhaul {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.lokasi.clone(),
            self.status.clone(),
            opt_text(&self.estimasi),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "lokasi" => SortValue::text(&self.lokasi),
            "status" => SortValue::text(&self.status),
            "estimasi" => SortValue::text(&opt_text(&self.estimasi)),
            "progress" => num(self.progress as f64),
            _ => SortValue::text(&self.name),
        }
    }
}

impl Validate for Overhaul {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("name", "Nama", &self.name)
            .text("lokasi", "Lokasi", &self.lokasi)
            .text("status", "Status", &self.status)
            .date("estimasi", "Estimasi", &self.estimasi)
            .range("progress", "Progress", self.progress, 0, 100)
            .finish()
    }
}

// ========================
// Calibration
// ========================

pub const CALIBRATION_STEPS: i64 = 5;
pub const CALIBRATION_STATUSES: &[&str] = &["Terjadwal", "Proses", "Selesai", "Terlambat"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Calibration {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub progress: i64,
    pub due_date: Option<String>,
    /// Stamped by the server on every write
    #[serde(skip_serializing)]
    pub last_update: Option<String>,
}

impl Record for Calibration {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.status.clone(), opt_text(&self.due_date)]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "status" => SortValue::text(&self.status),
            "progress" => num(self.progress as f64),
            "dueDate" => SortValue::text(&opt_text(&self.due_date)),
            "lastUpdate" => SortValue::text(&opt_text(&self.last_update)),
            _ => SortValue::text(&self.name),
        }
    }
}

impl Validate for Calibration {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("name", "Nama alat", &self.name)
            .text("status", "Status", &self.status)
            .range("progress", "Progress", self.progress, 0, CALIBRATION_STEPS)
            .date("dueDate", "Jatuh tempo", &self.due_date)
            .finish()
    }
}

// ========================
// Personnel
// ========================

pub const PERSONNEL_STATUSES: &[&str] = &["Aktif", "Cuti", "Nonaktif"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personnel {
    pub id: u32,
    pub nip: String,
    pub jabatan: String,
    pub divisi: String,
    pub status: String,
    pub join_date: Option<String>,
    pub phone_number: String,
    pub urgent_number: String,
    #[serde(rename = "profile_id")]
    pub profile_id: Option<u32>,
}

impl Record for Personnel {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.nip.clone(),
            self.jabatan.clone(),
            self.divisi.clone(),
            self.status.clone(),
            opt_text(&self.join_date),
            self.phone_number.clone(),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "jabatan" => SortValue::text(&self.jabatan),
            "divisi" => SortValue::text(&self.divisi),
            "status" => SortValue::text(&self.status),
            "joinDate" => SortValue::text(&opt_text(&self.join_date)),
            _ => SortValue::text(&self.nip),
        }
    }
}

impl Validate for Personnel {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("nip", "NIP", &self.nip)
            .text("jabatan", "Jabatan", &self.jabatan)
            .text("divisi", "Divisi", &self.divisi)
            .text("status", "Status", &self.status)
            .date("joinDate", "Tanggal bergabung", &self.join_date)
            .text("phoneNumber", "No. telepon", &self.phone_number)
            .text("urgentNumber", "No. darurat", &self.urgent_number)
            .finish()
    }
}

// ========================
// Quality control
// ========================

pub const DEPARTMENTS: &[&str] = &["Production", "Overhaul", "Rekayasa", "Kalibrasi"];
pub const QC_STATUSES: &[&str] = &["Lulus", "Proses", "Gagal"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityCheck {
    /// Display code such as `KAL-4`
    pub id: String,
    pub qc_id: u32,
    pub product: String,
    pub batch: String,
    pub status: String,
    pub tested: i64,
    pub passed: i64,
    pub date: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "passRate")]
    pub pass_rate: i64,
    /// `qc`, `produksi` or `overhaul`
    pub source: String,
    pub produksi_id: Option<u32>,
    pub overhaul_id: Option<u32>,
}

impl QualityCheck {
    /// Rows synthesized from production runs or overhauls cannot be edited
    pub fn is_derived(&self) -> bool {
        !self.source.is_empty() && self.source != "qc"
    }
}

/// `round(passed / tested * 100)`, 0 when nothing was tested
pub fn pass_rate(passed: i64, tested: i64) -> i64 {
    if tested <= 0 {
        return 0;
    }
    (passed as f64 / tested as f64 * 100.0 + 0.5).floor() as i64
}

impl Record for QualityCheck {
    fn id(&self) -> u32 {
        self.qc_id
    }

    fn key(&self) -> String {
        format!("{}-{}", if self.source.is_empty() { "qc" } else { &self.source }, self.qc_id)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.product.clone(),
            self.batch.clone(),
            self.status.clone(),
            opt_text(&self.department),
            opt_text(&self.date),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "id" => SortValue::text(&self.id),
            "batch" => SortValue::text(&self.batch),
            "status" => SortValue::text(&self.status),
            "tested" => num(self.tested as f64),
            "passed" => num(self.passed as f64),
            "passRate" => num(self.pass_rate as f64),
            "date" => SortValue::text(&opt_text(&self.date)),
            "department" => SortValue::text(&opt_text(&self.department)),
            _ => SortValue::text(&self.product),
        }
    }
}

impl Validate for QualityCheck {
    fn validate(&self) -> Vec<FieldError> {
        let department_ok = self
            .department
            .as_deref()
            .map_or(false, |d| DEPARTMENTS.contains(&d));
        Checks::new()
            .text("product", "Produk", &self.product)
            .text("batch", "Batch", &self.batch)
            .text("status", "Status", &self.status)
            .check(department_ok, "department", "Departemen wajib dipilih")
            .date("date", "Tanggal", &self.date)
            .check(self.tested >= 0, "tested", "Jumlah diuji tidak boleh negatif")
            .check(
                self.passed >= 0 && self.passed <= self.tested,
                "passed",
                "Jumlah lulus harus antara 0 dan jumlah diuji",
            )
            .finish()
    }
}

// ========================
// Stock
// ========================

pub const STOCK_STATUSES: &[&str] = &["Ready", "Limit", "Kosong"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockEntry {
    pub id: u32,
    pub item_name: String,
    pub quantity: i64,
    pub location: String,
    pub status: String,
    /// Stamped by the server on every write
    #[serde(skip_serializing)]
    pub last_update: Option<String>,
    #[serde(rename = "inventory_id")]
    pub inventory_id: Option<u32>,
    #[serde(rename = "produksi_id")]
    pub produksi_id: Option<u32>,
}

impl Record for StockEntry {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.item_name.clone(),
            self.quantity.to_string(),
            self.location.clone(),
            self.status.clone(),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "quantity" => num(self.quantity as f64),
            "location" => SortValue::text(&self.location),
            "status" => SortValue::text(&self.status),
            "lastUpdate" => SortValue::text(&opt_text(&self.last_update)),
            _ => SortValue::text(&self.item_name),
        }
    }
}

impl Validate for StockEntry {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("itemName", "Nama barang", &self.item_name)
            .check(self.quantity >= 0, "quantity", "Jumlah tidak boleh negatif")
            .text("location", "Lokasi", &self.location)
            .text("status", "Status", &self.status)
            .finish()
    }
}

// ========================
// Engineering
// ========================

pub const ENGINEERING_STATUSES: &[&str] = &["Desain", "Prototipe", "Pengujian", "Selesai"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineeringProject {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub team: Vec<String>,
    pub deadline: Option<String>,
    pub progress: i64,
}

impl Record for EngineeringProject {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.status.clone(), opt_text(&self.deadline)];
        fields.extend(self.team.iter().cloned());
        fields
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "status" => SortValue::text(&self.status),
            "deadline" => SortValue::text(&opt_text(&self.deadline)),
            "progress" => num(self.progress as f64),
            _ => SortValue::text(&self.name),
        }
    }
}

impl Validate for EngineeringProject {
    fn validate(&self) -> Vec<FieldError> {
        let members: Vec<&String> = self.team.iter().filter(|m| !m.trim().is_empty()).collect();
        Checks::new()
            .text("name", "Nama proyek", &self.name)
            .date("deadline", "Deadline", &self.deadline)
            .non_empty("team", "Tim", &members)
            .range("progress", "Progress", self.progress, 0, 100)
            .finish()
    }
}

/// Split a comma-separated team field from a form input
pub fn parse_team(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

// ========================
// Profile
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub position: String,
    pub period: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub id: u32,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub education: Option<Education>,
    pub experience: Option<Experience>,
}

impl Profile {
    /// Education/experience blocks left blank in the form are sent as null
    pub fn drop_empty_sections(&mut self) {
        let blank = |s: &str| s.trim().is_empty();
        if self
            .education
            .as_ref()
            .is_some_and(|e| blank(&e.degree) && blank(&e.university) && blank(&e.year))
        {
            self.education = None;
        }
        if self
            .experience
            .as_ref()
            .is_some_and(|e| blank(&e.position) && blank(&e.period))
        {
            self.experience = None;
        }
    }
}

impl Record for Profile {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.email.clone(), self.address.clone(), self.phone_number.clone()];
        if let Some(edu) = &self.education {
            fields.push(edu.university.clone());
        }
        if let Some(exp) = &self.experience {
            fields.push(exp.position.clone());
        }
        fields
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "address" => SortValue::text(&self.address),
            "phoneNumber" => SortValue::text(&self.phone_number),
            _ => SortValue::text(&self.email),
        }
    }
}

impl Validate for Profile {
    fn validate(&self) -> Vec<FieldError> {
        Checks::new()
            .text("email", "Email", &self.email)
            .text("address", "Alamat", &self.address)
            .text("phoneNumber", "No. telepon", &self.phone_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::filter_records;

    #[test]
    fn test_qc_wire_names() {
        let qc: QualityCheck = serde_json::from_str(
            r#"{"id":"PRD-7","qc_id":7,"product":"Way Station","batch":"BATCH-2024-7",
                "status":"Lulus","tested":50,"passed":45,"date":"2024-04-30",
                "department":"Production","passRate":90,"source":"produksi","produksi_id":7}"#,
        )
        .unwrap();
        assert!(qc.is_derived());
        assert_eq!(qc.key(), "produksi-7");
        assert_eq!(qc.pass_rate, 90);
    }

    #[test]
    fn test_pass_rate_rounds_half_up() {
        assert_eq!(pass_rate(1, 8), 13);
        assert_eq!(pass_rate(0, 0), 0);
    }

    #[test]
    fn test_null_dates_deserialize() {
        let run: ProductionRun =
            serde_json::from_str(r#"{"id":1,"name":"x","startDate":null}"#).unwrap();
        assert_eq!(run.start_date, None);
    }

    #[test]
    fn test_required_fields_block_submission() {
        let draft = Personnel {
            nip: "1987".into(),
            ..Default::default()
        };
        let errors = draft.validate();
        assert!(errors.iter().any(|e| e.field == "jabatan"));
        assert!(errors.iter().any(|e| e.field == "joinDate"));
        assert!(!errors.iter().any(|e| e.field == "nip"));
    }

    #[test]
    fn test_production_dates_must_be_ordered() {
        let run = ProductionRun {
            name: "Radio".into(),
            target: 10,
            start_date: Some("2024-05-01".into()),
            end_date: Some("2024-04-01".into()),
            ..Default::default()
        };
        assert!(run.validate().iter().any(|e| e.field == "endDate"));
    }

    #[test]
    fn test_search_covers_team_members() {
        let projects = vec![EngineeringProject {
            id: 1,
            name: "Signal".into(),
            team: vec!["Sari".into()],
            ..Default::default()
        }];
        assert_eq!(filter_records(&projects, "sari").len(), 1);
    }

    #[test]
    fn test_parse_team() {
        assert_eq!(parse_team(" Andi, ,Sari "), vec!["Andi", "Sari"]);
        assert!(parse_team("").is_empty());
    }

    #[test]
    fn test_overhaul_omits_missing_history_timestamp() {
        let entry = HistoryEntry {
            description: "Bongkar".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_blank_profile_sections_become_null() {
        let mut profile = Profile {
            education: Some(Education {
                degree: " ".into(),
                ..Default::default()
            }),
            experience: Some(Experience {
                position: "Teknisi".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        profile.drop_empty_sections();
        assert!(profile.education.is_none());
        assert!(profile.experience.is_some());
    }
}
