//! Production Repository
//!
//! Personnel, materials and progress notes are stored as JSON text columns
//! next to the production run they belong to.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, ProductionRun};
use super::db::{db_error, json_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_PRODUKSI: &str = "SELECT id, name, target, completed, status, start_date, end_date, \
     personnel_data, materials_data, progress_data FROM produksi";

/// Raw row before the JSON columns are decoded
struct ProduksiRow {
    run: ProductionRun,
    personnel: String,
    materials: String,
    progress: String,
}

pub struct ProductionRepository {
    conn: SharedConnection,
}

impl ProductionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for ProductionRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

/// Encoded JSON columns for a run
fn encode(entity: &ProductionRun) -> DomainResult<(String, String, String)> {
    Ok((
        serde_json::to_string(&entity.personnel).map_err(json_error)?,
        serde_json::to_string(&entity.materials).map_err(json_error)?,
        serde_json::to_string(&entity.progress).map_err(json_error)?,
    ))
}

fn decode(raw: ProduksiRow) -> DomainResult<ProductionRun> {
    let mut run = raw.run;
    run.personnel = serde_json::from_str(&raw.personnel).map_err(json_error)?;
    run.materials = serde_json::from_str(&raw.materials).map_err(json_error)?;
    run.progress = serde_json::from_str(&raw.progress).map_err(json_error)?;
    Ok(run)
}

/// Load every production run (caller holds the lock)
pub(crate) fn list_runs(conn: &Connection) -> DomainResult<Vec<ProductionRun>> {
    let mut stmt = conn
        .prepare(&format!("{} ORDER BY id ASC", SELECT_PRODUKSI))
        .map_err(db_error)?;
    let rows = stmt
        .query_map([], row_to_raw)
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)?;
    rows.into_iter().map(decode).collect()
}

#[async_trait]
impl Repository<ProductionRun> for ProductionRepository {
    async fn create(&self, entity: &ProductionRun) -> DomainResult<ProductionRun> {
        let (personnel, materials, progress) = encode(entity)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO produksi (name, target, completed, status, start_date, end_date, personnel_data, materials_data, progress_data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entity.name,
                entity.target,
                entity.completed,
                entity.status,
                entity.start_date,
                entity.end_date,
                personnel,
                materials,
                progress
            ],
        )
        .map_err(db_error)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ProductionRun>> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_PRODUKSI), params![id], row_to_raw)
            .optional()
            .map_err(db_error)?;
        raw.map(decode).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<ProductionRun>> {
        let conn = self.conn.lock().await;
        list_runs(&conn)
    }

    async fn update(&self, entity: &ProductionRun) -> DomainResult<ProductionRun> {
        let (personnel, materials, progress) = encode(entity)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE produksi SET name = ?1, target = ?2, completed = ?3, status = ?4, start_date = ?5,
                 end_date = ?6, personnel_data = ?7, materials_data = ?8, progress_data = ?9 WHERE id = ?10",
                params![
                    entity.name,
                    entity.target,
                    entity.completed,
                    entity.status,
                    entity.start_date,
                    entity.end_date,
                    personnel,
                    materials,
                    progress,
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("production run {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM produksi WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("production run {}", id)));
        }
        Ok(())
    }
}

fn row_to_raw(row: &Row) -> rusqlite::Result<ProduksiRow> {
    Ok(ProduksiRow {
        run: ProductionRun {
            id: row.get(0)?,
            name: row.get(1)?,
            target: row.get(2)?,
            completed: row.get(3)?,
            status: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            ..Default::default()
        },
        personnel: row.get(7)?,
        materials: row.get(8)?,
        progress: row.get(9)?,
    })
}
