//! Personnel Repository

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Personnel};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_PERSONALIA: &str = "SELECT id, nip, jabatan, divisi, status, join_date, phone_number, \
     urgent_number, profile_id FROM personalia";

pub struct PersonnelRepository {
    conn: SharedConnection,
}

impl PersonnelRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Link (or unlink with `None`) a profile to a personnel record
    ///
    /// The profile must exist; the personnel record is returned as stored.
    pub async fn assign_profile(&self, id: u32, profile_id: Option<u32>) -> DomainResult<Personnel> {
        let conn = self.conn.lock().await;
        if let Some(pid) = profile_id {
            let exists = conn
                .query_row("SELECT 1 FROM profile WHERE id = ?1", params![pid], |_| Ok(()))
                .optional()
                .map_err(db_error)?
                .is_some();
            if !exists {
                return Err(DomainError::InvalidInput(format!("profile {} not found", pid)));
            }
        }

        let changed = conn
            .execute(
                "UPDATE personalia SET profile_id = ?1 WHERE id = ?2",
                params![profile_id, id],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("personnel {}", id)));
        }

        conn.query_row(&format!("{} WHERE id = ?1", SELECT_PERSONALIA), params![id], row_to_personnel)
            .map_err(db_error)
    }
}

impl FromConnection for PersonnelRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<Personnel> for PersonnelRepository {
    async fn create(&self, entity: &Personnel) -> DomainResult<Personnel> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO personalia (nip, jabatan, divisi, status, join_date, phone_number, urgent_number, profile_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entity.nip,
                entity.jabatan,
                entity.divisi,
                entity.status,
                entity.join_date,
                entity.phone_number,
                entity.urgent_number,
                entity.profile_id
            ],
        )
        .map_err(db_error)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Personnel>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_PERSONALIA), params![id], row_to_personnel)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<Personnel>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_PERSONALIA))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_personnel).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &Personnel) -> DomainResult<Personnel> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE personalia SET nip = ?1, jabatan = ?2, divisi = ?3, status = ?4, join_date = ?5,
                 phone_number = ?6, urgent_number = ?7, profile_id = ?8 WHERE id = ?9",
                params![
                    entity.nip,
                    entity.jabatan,
                    entity.divisi,
                    entity.status,
                    entity.join_date,
                    entity.phone_number,
                    entity.urgent_number,
                    entity.profile_id,
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("personnel {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM personalia WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("personnel {}", id)));
        }
        Ok(())
    }
}

fn row_to_personnel(row: &Row) -> rusqlite::Result<Personnel> {
    Ok(Personnel {
        id: row.get(0)?,
        nip: row.get(1)?,
        jabatan: row.get(2)?,
        divisi: row.get(3)?,
        status: row.get(4)?,
        join_date: row.get(5)?,
        phone_number: row.get(6)?,
        urgent_number: row.get(7)?,
        profile_id: row.get(8)?,
    })
}
