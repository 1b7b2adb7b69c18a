//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations use SQLite through a shared connection.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity};
use super::db::SharedConnection;

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async so handlers can await them uniformly.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity, returning it with its assigned ID
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity; `NotFound` when the ID is unknown
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID; `NotFound` when the ID is unknown
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Repositories constructed from the shared connection
pub trait FromConnection {
    fn from_connection(conn: SharedConnection) -> Self;
}
