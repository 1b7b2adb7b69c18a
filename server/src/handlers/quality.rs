//! Quality-control routes
//!
//! The listing mixes stored entries with entries derived from production
//! runs and overhauls; the remaining verbs only touch stored entries.

use axum::extract::{Path, State};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};

use crate::domain::QualityCheck;
use crate::repository::QualityRepository;
use crate::AppState;
use super::crud;
use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", collection())
        .route(
            "/{id}",
            get(crud::get_one::<QualityCheck, QualityRepository>)
                .put(crud::update::<QualityCheck, QualityRepository>)
                .delete(crud::remove::<QualityCheck, QualityRepository>),
        )
        .route("/frontend/{code}", get(find_by_code))
}

pub(super) fn collection() -> MethodRouter<AppState> {
    get(list_all).post(crud::create::<QualityCheck, QualityRepository>)
}

/// `GET /api/qc`
async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<QualityCheck>>, ApiError> {
    let entries = state.repo::<QualityRepository>().list_with_derived().await?;
    Ok(Json(entries))
}

/// `GET /api/qc/frontend/{code}`
async fn find_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<QualityCheck>, ApiError> {
    let entry = state.repo::<QualityRepository>().find_by_code(&code).await?;
    Ok(Json(entry))
}
