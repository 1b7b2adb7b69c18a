//! Calibration Repository
//!
//! `last_update` is owned by the store and refreshed on every write.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{Calibration, DomainError, DomainResult};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_KALIBRASI: &str =
    "SELECT id, tool_name, status, progress_step, due_date, last_update FROM kalibrasi";

pub struct CalibrationRepository {
    conn: SharedConnection,
}

impl CalibrationRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for CalibrationRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<Calibration> for CalibrationRepository {
    async fn create(&self, entity: &Calibration) -> DomainResult<Calibration> {
        let now = Utc::now();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO kalibrasi (tool_name, status, progress_step, due_date, last_update)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entity.name, entity.status, entity.progress, entity.due_date, now],
        )
        .map_err(db_error)?;

        Ok(Calibration {
            id: conn.last_insert_rowid() as u32,
            last_update: Some(now),
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Calibration>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_KALIBRASI), params![id], row_to_calibration)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<Calibration>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_KALIBRASI))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_calibration).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &Calibration) -> DomainResult<Calibration> {
        let now = Utc::now();
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE kalibrasi SET tool_name = ?1, status = ?2, progress_step = ?3, due_date = ?4,
                 last_update = ?5 WHERE id = ?6",
                params![entity.name, entity.status, entity.progress, entity.due_date, now, entity.id],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("calibration {}", entity.id)));
        }
        Ok(Calibration {
            last_update: Some(now),
            ..entity.clone()
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM kalibrasi WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("calibration {}", id)));
        }
        Ok(())
    }
}

fn row_to_calibration(row: &Row) -> rusqlite::Result<Calibration> {
    Ok(Calibration {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        progress: row.get(3)?,
        due_date: row.get(4)?,
        last_update: row.get(5)?,
    })
}
