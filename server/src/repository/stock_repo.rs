//! Stock Repository
//!
//! Finished-goods stock. A client-supplied `lastUpdate` is kept,
//! otherwise the write time is recorded.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, StockEntry};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_STOCK: &str = "SELECT id, item_name, quantity, location, status, last_update, \
     inventory_id, produksi_id FROM stock_production";

pub struct StockRepository {
    conn: SharedConnection,
}

impl StockRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for StockRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<StockEntry> for StockRepository {
    async fn create(&self, entity: &StockEntry) -> DomainResult<StockEntry> {
        let last_update = Utc::now();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO stock_production (item_name, quantity, location, status, last_update, inventory_id, produksi_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entity.item_name,
                entity.quantity,
                entity.location,
                entity.status,
                last_update,
                entity.inventory_id,
                entity.produksi_id
            ],
        )
        .map_err(db_error)?;

        Ok(StockEntry {
            id: conn.last_insert_rowid() as u32,
            last_update: Some(last_update),
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<StockEntry>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_STOCK), params![id], row_to_stock)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<StockEntry>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_STOCK))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_stock).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &StockEntry) -> DomainResult<StockEntry> {
        let last_update = Utc::now();
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE stock_production SET item_name = ?1, quantity = ?2, location = ?3, status = ?4,
                 last_update = ?5, inventory_id = ?6, produksi_id = ?7 WHERE id = ?8",
                params![
                    entity.item_name,
                    entity.quantity,
                    entity.location,
                    entity.status,
                    last_update,
                    entity.inventory_id,
                    entity.produksi_id,
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("stock entry {}", entity.id)));
        }
        Ok(StockEntry {
            last_update: Some(last_update),
            ..entity.clone()
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM stock_production WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("stock entry {}", id)));
        }
        Ok(())
    }
}

fn row_to_stock(row: &Row) -> rusqlite::Result<StockEntry> {
    Ok(StockEntry {
        id: row.get(0)?,
        item_name: row.get(1)?,
        quantity: row.get(2)?,
        location: row.get(3)?,
        status: row.get(4)?,
        last_update: row.get(5)?,
        inventory_id: row.get(6)?,
        produksi_id: row.get(7)?,
    })
}
