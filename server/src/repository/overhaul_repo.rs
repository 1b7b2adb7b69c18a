//! Overhaul Repository
//!
//! Overhaul jobs plus their history entries. History rows live in
//! `overhaul_history` and are replaced wholesale on update.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, HistoryEntry, Overhaul};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_OVERHAUL: &str = "SELECT id, name, location, status, estimate, progress, \
     personalia_id, inventory_id FROM overhaul";

pub struct OverhaulRepository {
    conn: SharedConnection,
}

impl OverhaulRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for OverhaulRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

// ========================
// Helpers (caller holds the lock)
// ========================

/// Insert history rows for an overhaul, stamping entries without a timestamp
fn insert_history(
    conn: &Connection,
    overhaul_id: u32,
    history: &[HistoryEntry],
) -> rusqlite::Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "INSERT INTO overhaul_history (overhaul_id, timestamp, description) VALUES (?1, ?2, ?3)",
    )?;
    let mut saved = Vec::with_capacity(history.len());
    for entry in history {
        let timestamp = entry.timestamp.unwrap_or_else(Utc::now);
        stmt.execute(params![overhaul_id, timestamp, entry.description])?;
        saved.push(HistoryEntry {
            id: conn.last_insert_rowid() as u32,
            timestamp: Some(timestamp),
            description: entry.description.clone(),
        });
    }
    Ok(saved)
}

fn history_for(conn: &Connection, overhaul_id: u32) -> rusqlite::Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, description FROM overhaul_history WHERE overhaul_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![overhaul_id], row_to_history)?;
    rows.collect()
}

/// Load every overhaul with its history, grouped in one pass
pub(crate) fn list_with_history(conn: &Connection) -> rusqlite::Result<Vec<Overhaul>> {
    let mut grouped: HashMap<u32, Vec<HistoryEntry>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT overhaul_id, id, timestamp, description FROM overhaul_history ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                HistoryEntry {
                    id: row.get(1)?,
                    timestamp: row.get(2)?,
                    description: row.get(3)?,
                },
            ))
        })?;
        for row in rows {
            let (overhaul_id, entry) = row?;
            grouped.entry(overhaul_id).or_default().push(entry);
        }
    }

    let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_OVERHAUL))?;
    let overhauls = stmt
        .query_map([], row_to_overhaul)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(overhauls
        .into_iter()
        .map(|mut o| {
            o.history = grouped.remove(&o.id).unwrap_or_default();
            o
        })
        .collect())
}

#[async_trait]
impl Repository<Overhaul> for OverhaulRepository {
    async fn create(&self, entity: &Overhaul) -> DomainResult<Overhaul> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(db_error)?;
        tx.execute(
            "INSERT INTO overhaul (name, location, status, estimate, progress, personalia_id, inventory_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entity.name,
                entity.location,
                entity.status,
                entity.estimate,
                entity.progress,
                entity.personalia_id,
                entity.inventory_id
            ],
        )
        .map_err(db_error)?;
        let id = tx.last_insert_rowid() as u32;
        let history = insert_history(&tx, id, &entity.history).map_err(db_error)?;
        tx.commit().map_err(db_error)?;

        Ok(Overhaul {
            id,
            history,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Overhaul>> {
        let conn = self.conn.lock().await;
        let overhaul = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_OVERHAUL), params![id], row_to_overhaul)
            .optional()
            .map_err(db_error)?;
        match overhaul {
            Some(mut o) => {
                o.history = history_for(&conn, id).map_err(db_error)?;
                Ok(Some(o))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Overhaul>> {
        let conn = self.conn.lock().await;
        list_with_history(&conn).map_err(db_error)
    }

    async fn update(&self, entity: &Overhaul) -> DomainResult<Overhaul> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(db_error)?;
        let changed = tx
            .execute(
                "UPDATE overhaul SET name = ?1, location = ?2, status = ?3, estimate = ?4, progress = ?5,
                 personalia_id = ?6, inventory_id = ?7 WHERE id = ?8",
                params![
                    entity.name,
                    entity.location,
                    entity.status,
                    entity.estimate,
                    entity.progress,
                    entity.personalia_id,
                    entity.inventory_id,
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("overhaul {}", entity.id)));
        }
        tx.execute("DELETE FROM overhaul_history WHERE overhaul_id = ?1", params![entity.id])
            .map_err(db_error)?;
        let history = insert_history(&tx, entity.id, &entity.history).map_err(db_error)?;
        tx.commit().map_err(db_error)?;

        Ok(Overhaul {
            history,
            ..entity.clone()
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        // History goes with it through ON DELETE CASCADE
        let changed = conn
            .execute("DELETE FROM overhaul WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("overhaul {}", id)));
        }
        Ok(())
    }
}

fn row_to_overhaul(row: &Row) -> rusqlite::Result<Overhaul> {
    Ok(Overhaul {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        status: row.get(3)?,
        estimate: row.get(4)?,
        progress: row.get(5)?,
        personalia_id: row.get(6)?,
        inventory_id: row.get(7)?,
        history: Vec::new(),
    })
}

fn row_to_history(row: &Row) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        description: row.get(2)?,
    })
}
