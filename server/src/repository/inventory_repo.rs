//! Inventory Repository
//!
//! SQLite-backed CRUD for inventory items.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, InventoryItem};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_INVENTORY: &str =
    "SELECT id, name, quantity, location, status, item_code FROM inventory";

/// SQLite implementation of the inventory repository
pub struct InventoryRepository {
    conn: SharedConnection,
}

impl InventoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for InventoryRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<InventoryItem> for InventoryRepository {
    async fn create(&self, entity: &InventoryItem) -> DomainResult<InventoryItem> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO inventory (name, quantity, location, status, item_code) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entity.name, entity.quantity, entity.location, entity.status, entity.item_code],
        )
        .map_err(db_error)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<InventoryItem>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_INVENTORY), params![id], row_to_inventory)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<InventoryItem>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_INVENTORY))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_inventory).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &InventoryItem) -> DomainResult<InventoryItem> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE inventory SET name = ?1, quantity = ?2, location = ?3, status = ?4, item_code = ?5 WHERE id = ?6",
                params![
                    entity.name,
                    entity.quantity,
                    entity.location,
                    entity.status,
                    entity.item_code,
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("inventory item {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM inventory WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("inventory item {}", id)));
        }
        Ok(())
    }
}

/// Convert a database row to InventoryItem
fn row_to_inventory(row: &Row) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        location: row.get(3)?,
        status: row.get(4)?,
        item_code: row.get(5)?,
    })
}
