//! Quality Control Repository
//!
//! Stored QC entries plus the combined listing that also carries entries
//! derived from production runs and overhauls. Derived entries are never
//! persisted.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{
    parse_code, Department, DomainError, DomainResult, QcSource, QualityCheck,
};
use super::db::{db_error, SharedConnection};
use super::overhaul_repo::list_with_history;
use super::production_repo::list_runs;
use super::traits::{FromConnection, Repository};

const SELECT_QC: &str = "SELECT id, product_name, batch_code, status, tested_count, passed_count, \
     qc_date, department, produksi_id, overhaul_id FROM quality_control";

pub struct QualityRepository {
    conn: SharedConnection,
}

impl QualityRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Stored entries followed by derived production and overhaul entries
    pub async fn list_with_derived(&self) -> DomainResult<Vec<QualityCheck>> {
        let conn = self.conn.lock().await;
        let mut entries = list_stored(&conn)?;
        entries.extend(list_runs(&conn)?.iter().map(QualityCheck::from_production));
        entries.extend(
            list_with_history(&conn)
                .map_err(db_error)?
                .iter()
                .map(QualityCheck::from_overhaul),
        );
        Ok(entries)
    }

    /// Look up a stored entry by its display code, e.g. `KAL-4`
    pub async fn find_by_code(&self, code: &str) -> DomainResult<QualityCheck> {
        let (prefix, number) = parse_code(code)?;
        let department = Department::from_prefix(&prefix)
            .ok_or_else(|| DomainError::NotFound(format!("QC entry {}", code)))?;

        let conn = self.conn.lock().await;
        conn.query_row(
            &format!("{} WHERE id = ?1 AND department = ?2", SELECT_QC),
            params![number, department.as_str()],
            row_to_qc,
        )
        .optional()
        .map_err(db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("QC entry {}", code)))
    }
}

impl FromConnection for QualityRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

fn list_stored(conn: &Connection) -> DomainResult<Vec<QualityCheck>> {
    let mut stmt = conn
        .prepare(&format!("{} ORDER BY id ASC", SELECT_QC))
        .map_err(db_error)?;
    let rows = stmt.query_map([], row_to_qc).map_err(db_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
}

fn exists(conn: &Connection, table: &str, id: u32) -> rusqlite::Result<bool> {
    conn.query_row(&format!("SELECT 1 FROM {} WHERE id = ?1", table), params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
}

/// Fill production/overhaul links from a `PRD-n` / `OVH-n` code
///
/// Unparseable codes and codes pointing at missing rows leave the links as sent.
fn resolve_links(conn: &Connection, entry: &mut QualityCheck) -> DomainResult<()> {
    if entry.code.trim().is_empty() {
        return Ok(());
    }
    let (prefix, number) = match parse_code(&entry.code) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("ignoring QC code {:?}: {}", entry.code, e);
            return Ok(());
        }
    };
    match Department::from_prefix(&prefix) {
        Some(Department::Production) => {
            if exists(conn, "produksi", number).map_err(db_error)? {
                entry.produksi_id = Some(number);
            }
        }
        Some(Department::Overhaul) => {
            if exists(conn, "overhaul", number).map_err(db_error)? {
                entry.overhaul_id = Some(number);
            }
        }
        _ => tracing::debug!("QC code {} has no linkable source", entry.code),
    }
    Ok(())
}

#[async_trait]
impl Repository<QualityCheck> for QualityRepository {
    async fn create(&self, entity: &QualityCheck) -> DomainResult<QualityCheck> {
        let mut entry = entity.clone();
        let conn = self.conn.lock().await;
        resolve_links(&conn, &mut entry)?;
        conn.execute(
            "INSERT INTO quality_control (product_name, batch_code, status, tested_count, passed_count,
             qc_date, department, produksi_id, overhaul_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.product_name,
                entry.batch_code,
                entry.status,
                entry.tested_count,
                entry.passed_count,
                entry.date,
                entry.department.map(|d| d.as_str()),
                entry.produksi_id,
                entry.overhaul_id
            ],
        )
        .map_err(db_error)?;

        entry.qc_id = conn.last_insert_rowid() as u32;
        entry.source = QcSource::Qc;
        entry.refresh();
        Ok(entry)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<QualityCheck>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_QC), params![id], row_to_qc)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<QualityCheck>> {
        let conn = self.conn.lock().await;
        list_stored(&conn)
    }

    async fn update(&self, entity: &QualityCheck) -> DomainResult<QualityCheck> {
        let mut entry = entity.clone();
        let conn = self.conn.lock().await;
        resolve_links(&conn, &mut entry)?;
        let changed = conn
            .execute(
                "UPDATE quality_control SET product_name = ?1, batch_code = ?2, status = ?3, tested_count = ?4,
                 passed_count = ?5, qc_date = ?6, department = ?7, produksi_id = ?8, overhaul_id = ?9 WHERE id = ?10",
                params![
                    entry.product_name,
                    entry.batch_code,
                    entry.status,
                    entry.tested_count,
                    entry.passed_count,
                    entry.date,
                    entry.department.map(|d| d.as_str()),
                    entry.produksi_id,
                    entry.overhaul_id,
                    entry.qc_id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("QC entry {}", entry.qc_id)));
        }
        entry.source = QcSource::Qc;
        entry.refresh();
        Ok(entry)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM quality_control WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("QC entry {}", id)));
        }
        Ok(())
    }
}

/// Convert a stored row, filling the code and pass rate
fn row_to_qc(row: &Row) -> rusqlite::Result<QualityCheck> {
    let department: String = row.get(7)?;
    let mut qc = QualityCheck {
        qc_id: row.get(0)?,
        product_name: row.get(1)?,
        batch_code: row.get(2)?,
        status: row.get(3)?,
        tested_count: row.get(4)?,
        passed_count: row.get(5)?,
        date: row.get(6)?,
        department: Department::from_str(&department),
        produksi_id: row.get(8)?,
        overhaul_id: row.get(9)?,
        source: QcSource::Qc,
        ..Default::default()
    };
    qc.refresh();
    Ok(qc)
}
