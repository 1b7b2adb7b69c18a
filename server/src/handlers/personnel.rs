//! Personnel-specific routes

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::domain::{AssignProfile, Personnel};
use crate::repository::PersonnelRepository;
use crate::AppState;
use super::error::{parse_id, ApiError};

/// `PUT /api/personalia/{id}/assign-profile`
pub async fn assign_profile(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<AssignProfile>, JsonRejection>,
) -> Result<Json<Personnel>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(body) = payload?;
    let person = state
        .repo::<PersonnelRepository>()
        .assign_profile(id, body.profile_id)
        .await?;
    tracing::info!("personnel {} profile set to {:?}", id, body.profile_id);
    Ok(Json(person))
}
