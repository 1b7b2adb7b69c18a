//! HTTP Handlers
//!
//! REST routes under `/api`, one nested router per resource.

pub mod crud;
pub mod error;
pub mod export;
mod personnel;
mod quality;

use axum::routing::{get, put, MethodRouter};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::domain::*;
use crate::repository::*;
use crate::AppState;
use crud::Resource;
use export::ExportKind;

impl Resource for InventoryItem {
    const NAME: &'static str = "inventory item";
}

impl Resource for ProductionRun {
    const NAME: &'static str = "production run";
}

impl Resource for Overhaul {
    const NAME: &'static str = "overhaul";
}

impl Resource for Calibration {
    const NAME: &'static str = "calibration";
}

impl Resource for Personnel {
    const NAME: &'static str = "personnel";
}

impl Resource for QualityCheck {
    const NAME: &'static str = "QC entry";
}

impl Resource for StockEntry {
    const NAME: &'static str = "stock entry";
}

impl Resource for EngineeringProject {
    const NAME: &'static str = "engineering project";
}

impl Resource for Profile {
    const NAME: &'static str = "profile";
}

/// Every resource router, ready to be nested under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(resource::<InventoryItem, InventoryRepository>(
            "/inventory",
            export::routes(ExportKind::Inventory),
        ))
        .merge(resource::<ProductionRun, ProductionRepository>(
            "/produksi",
            export::routes(ExportKind::Produksi),
        ))
        .merge(resource::<Overhaul, OverhaulRepository>(
            "/overhaul",
            export::routes(ExportKind::Overhaul),
        ))
        .merge(resource::<Calibration, CalibrationRepository>(
            "/kalibrasi",
            export::routes(ExportKind::Kalibrasi),
        ))
        .merge(resource::<Personnel, PersonnelRepository>(
            "/personalia",
            export::routes(ExportKind::Personalia)
                .route("/{id}/assign-profile", put(personnel::assign_profile)),
        ))
        .merge(mount("/qc", quality::collection(), quality::routes()))
        .merge(resource::<StockEntry, StockRepository>("/stock", Router::new()))
        .merge(resource::<EngineeringProject, EngineeringRepository>("/rekayasa", Router::new()))
        .merge(resource::<Profile, ProfileRepository>("/profile", Router::new()))
}

fn resource<T, R>(prefix: &str, extra: Router<AppState>) -> Router<AppState>
where
    T: crud::Resource,
    R: Repository<T> + FromConnection + 'static,
{
    mount(prefix, crud::collection::<T, R>(), crud::routes::<T, R>().merge(extra))
}

/// Nests `routes` under `prefix` and also answers the collection verbs on
/// `prefix/`, which nesting alone does not match.
fn mount(prefix: &str, collection: MethodRouter<AppState>, routes: Router<AppState>) -> Router<AppState> {
    Router::new()
        .route(&format!("{prefix}/"), collection)
        .nest(prefix, routes)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Router-level fallback for unknown paths
pub async fn not_found() -> error::ApiError {
    error::ApiError::new(axum::http::StatusCode::NOT_FOUND, "route not found")
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
