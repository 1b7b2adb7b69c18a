//! Generic CRUD Handlers
//!
//! One set of handlers serves every resource; the entity type and its
//! repository are picked at route registration.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DomainError, Entity, Validate};
use crate::repository::{FromConnection, Repository};
use crate::AppState;
use super::error::{parse_id, ApiError};

/// Bounds shared by every resource served through these handlers
pub trait Resource: Entity<Id = u32> + Validate + Serialize + DeserializeOwned + 'static {
    /// Singular name used in log lines and not-found messages
    const NAME: &'static str;
}

/// `GET /`, `POST /`, `GET /{id}`, `PUT /{id}`, `DELETE /{id}`
pub fn routes<T, R>() -> Router<AppState>
where
    T: Resource,
    R: Repository<T> + FromConnection + 'static,
{
    Router::new()
        .route("/", collection::<T, R>())
        .route(
            "/{id}",
            get(get_one::<T, R>).put(update::<T, R>).delete(remove::<T, R>),
        )
}

/// `GET` and `POST` on the collection path
pub fn collection<T, R>() -> MethodRouter<AppState>
where
    T: Resource,
    R: Repository<T> + FromConnection + 'static,
{
    get(list::<T, R>).post(create::<T, R>)
}

pub async fn list<T, R>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError>
where
    T: Resource,
    R: Repository<T> + FromConnection,
{
    let items = state.repo::<R>().list().await?;
    Ok(Json(items))
}

pub async fn get_one<T, R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<T>, ApiError>
where
    T: Resource,
    R: Repository<T> + FromConnection,
{
    let id = parse_id(&raw_id)?;
    let item = state
        .repo::<R>()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("{} {}", T::NAME, id)))?;
    Ok(Json(item))
}

pub async fn create<T, R>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: Resource,
    R: Repository<T> + FromConnection,
{
    let Json(entity) = payload?;
    entity.validate()?;
    let created = state.repo::<R>().create(&entity).await?;
    tracing::info!("created {} {}", T::NAME, created.id());
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T, R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError>
where
    T: Resource,
    R: Repository<T> + FromConnection,
{
    let id = parse_id(&raw_id)?;
    let Json(mut entity) = payload?;
    entity.set_id(id);
    entity.validate()?;
    let updated = state.repo::<R>().update(&entity).await?;
    tracing::info!("updated {} {}", T::NAME, id);
    Ok(Json(updated))
}

pub async fn remove<T, R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    T: Resource,
    R: Repository<T> + FromConnection,
{
    let id = parse_id(&raw_id)?;
    state.repo::<R>().delete(id).await?;
    tracing::info!("deleted {} {}", T::NAME, id);
    Ok(StatusCode::NO_CONTENT)
}
