//! Resource Calls
//!
//! Generic CRUD calls over every resource the backend exposes.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{encode, read_json, send, ApiError};
use crate::models::{
    Calibration, EngineeringProject, InventoryItem, Overhaul, Personnel, ProductionRun, Profile,
    QualityCheck, StockEntry,
};

/// A record type served under `/api/{PATH}`
pub trait Endpoint: Serialize + DeserializeOwned + 'static {
    const PATH: &'static str;
}

impl Endpoint for InventoryItem {
    const PATH: &'static str = "inventory";
}

impl Endpoint for ProductionRun {
    const PATH: &'static str = "produksi";
}

impl Endpoint for Overhaul {
    const PATH: &'static str = "overhaul";
}

impl Endpoint for Calibration {
    const PATH: &'static str = "kalibrasi";
}

impl Endpoint for Personnel {
    const PATH: &'static str = "personalia";
}

impl Endpoint for QualityCheck {
    const PATH: &'static str = "qc";
}

impl Endpoint for StockEntry {
    const PATH: &'static str = "stock";
}

impl Endpoint for EngineeringProject {
    const PATH: &'static str = "rekayasa";
}

impl Endpoint for Profile {
    const PATH: &'static str = "profile";
}

fn collection<T: Endpoint>() -> String {
    format!("/{}", T::PATH)
}

fn member<T: Endpoint>(id: u32) -> String {
    format!("/{}/{}", T::PATH, id)
}

// ========================
// CRUD
// ========================

pub async fn list<T: Endpoint>() -> Result<Vec<T>, ApiError> {
    let response = send("GET", &collection::<T>(), None).await?;
    read_json(response).await
}

pub async fn get<T: Endpoint>(id: u32) -> Result<T, ApiError> {
    let response = send("GET", &member::<T>(id), None).await?;
    read_json(response).await
}

pub async fn create<T: Endpoint>(record: &T) -> Result<T, ApiError> {
    let response = send("POST", &collection::<T>(), Some(encode(record)?)).await?;
    read_json(response).await
}

pub async fn update<T: Endpoint>(id: u32, record: &T) -> Result<T, ApiError> {
    let response = send("PUT", &member::<T>(id), Some(encode(record)?)).await?;
    read_json(response).await
}

pub async fn delete<T: Endpoint>(id: u32) -> Result<(), ApiError> {
    send("DELETE", &member::<T>(id), None).await?;
    Ok(())
}

// ========================
// Extra routes
// ========================

#[derive(Serialize)]
struct AssignProfileArgs {
    profile_id: Option<u32>,
}

/// Link a person to a profile, or unlink with `None`
pub async fn assign_profile(personnel_id: u32, profile_id: Option<u32>) -> Result<Personnel, ApiError> {
    let path = format!("{}/assign-profile", member::<Personnel>(personnel_id));
    let body = encode(&AssignProfileArgs { profile_id })?;
    let response = send("PUT", &path, Some(body)).await?;
    read_json(response).await
}

/// Look up a stored QC entry by its display code, e.g. `KAL-4`
pub async fn qc_by_code(code: &str) -> Result<QualityCheck, ApiError> {
    let path = format!(
        "/{}/frontend/{}",
        QualityCheck::PATH,
        utf8_percent_encode(code, NON_ALPHANUMERIC)
    );
    let response = send("GET", &path, None).await?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(collection::<ProductionRun>(), "/produksi");
        assert_eq!(member::<Calibration>(7), "/kalibrasi/7");
        assert_eq!(member::<EngineeringProject>(1), "/rekayasa/1");
    }
}
