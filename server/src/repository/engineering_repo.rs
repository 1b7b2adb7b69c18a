//! Engineering (Rekayasa) Repository
//!
//! Team members are stored as one comma-separated column.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{join_team, split_team, DomainError, DomainResult, EngineeringProject};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_REKAYASA: &str = "SELECT id, name, status, team, deadline, progress FROM rekayasa";

pub struct EngineeringRepository {
    conn: SharedConnection,
}

impl EngineeringRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for EngineeringRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<EngineeringProject> for EngineeringRepository {
    async fn create(&self, entity: &EngineeringProject) -> DomainResult<EngineeringProject> {
        let team = join_team(&entity.team);
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO rekayasa (name, status, team, deadline, progress) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entity.name, entity.status, team, entity.deadline, entity.progress],
        )
        .map_err(db_error)?;

        Ok(EngineeringProject {
            id: conn.last_insert_rowid() as u32,
            team: split_team(&team),
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<EngineeringProject>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_REKAYASA), params![id], row_to_project)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<EngineeringProject>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_REKAYASA))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_project).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &EngineeringProject) -> DomainResult<EngineeringProject> {
        let team = join_team(&entity.team);
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE rekayasa SET name = ?1, status = ?2, team = ?3, deadline = ?4, progress = ?5 WHERE id = ?6",
                params![entity.name, entity.status, team, entity.deadline, entity.progress, entity.id],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("engineering project {}", entity.id)));
        }
        Ok(EngineeringProject {
            team: split_team(&team),
            ..entity.clone()
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute("DELETE FROM rekayasa WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("engineering project {}", id)));
        }
        Ok(())
    }
}

fn row_to_project(row: &Row) -> rusqlite::Result<EngineeringProject> {
    let team: String = row.get(3)?;
    Ok(EngineeringProject {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        team: split_team(&team),
        deadline: row.get(4)?,
        progress: row.get(5)?,
    })
}
