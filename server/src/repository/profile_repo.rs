//! Profile Repository
//!
//! Education and experience are flattened into nullable columns. Deleting
//! a profile clears any personnel link pointing at it.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Education, Experience, Profile};
use super::db::{db_error, SharedConnection};
use super::traits::{FromConnection, Repository};

const SELECT_PROFILE: &str = "SELECT id, email, address, phone_number, edu_degree, edu_university, \
     edu_year, exp_position, exp_period FROM profile";

pub struct ProfileRepository {
    conn: SharedConnection,
}

impl ProfileRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl FromConnection for ProfileRepository {
    fn from_connection(conn: SharedConnection) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl Repository<Profile> for ProfileRepository {
    async fn create(&self, entity: &Profile) -> DomainResult<Profile> {
        let edu = entity.education.as_ref();
        let exp = entity.experience.as_ref();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO profile (email, address, phone_number, edu_degree, edu_university, edu_year, exp_position, exp_period)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entity.email,
                entity.address,
                entity.phone_number,
                edu.map(|e| &e.degree),
                edu.map(|e| &e.university),
                edu.map(|e| &e.year),
                exp.map(|e| &e.position),
                exp.map(|e| &e.period)
            ],
        )
        .map_err(db_error)?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Profile>> {
        let conn = self.conn.lock().await;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_PROFILE), params![id], row_to_profile)
            .optional()
            .map_err(db_error)
    }

    async fn list(&self) -> DomainResult<Vec<Profile>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_PROFILE))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_profile).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    async fn update(&self, entity: &Profile) -> DomainResult<Profile> {
        let edu = entity.education.as_ref();
        let exp = entity.experience.as_ref();
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE profile SET email = ?1, address = ?2, phone_number = ?3, edu_degree = ?4,
                 edu_university = ?5, edu_year = ?6, exp_position = ?7, exp_period = ?8 WHERE id = ?9",
                params![
                    entity.email,
                    entity.address,
                    entity.phone_number,
                    edu.map(|e| &e.degree),
                    edu.map(|e| &e.university),
                    edu.map(|e| &e.year),
                    exp.map(|e| &e.position),
                    exp.map(|e| &e.period),
                    entity.id
                ],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("profile {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(db_error)?;
        let changed = tx
            .execute("DELETE FROM profile WHERE id = ?1", params![id])
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("profile {}", id)));
        }
        tx.execute(
            "UPDATE personalia SET profile_id = NULL WHERE profile_id = ?1",
            params![id],
        )
        .map_err(db_error)?;
        tx.commit().map_err(db_error)
    }
}

fn row_to_profile(row: &Row) -> rusqlite::Result<Profile> {
    let degree: Option<String> = row.get(4)?;
    let university: Option<String> = row.get(5)?;
    let year: Option<String> = row.get(6)?;
    let position: Option<String> = row.get(7)?;
    let period: Option<String> = row.get(8)?;

    let education = match (degree, university, year) {
        (None, None, None) => None,
        (degree, university, year) => Some(Education {
            degree: degree.unwrap_or_default(),
            university: university.unwrap_or_default(),
            year: year.unwrap_or_default(),
        }),
    };
    let experience = match (position, period) {
        (None, None) => None,
        (position, period) => Some(Experience {
            position: position.unwrap_or_default(),
            period: period.unwrap_or_default(),
        }),
    };

    Ok(Profile {
        id: row.get(0)?,
        email: row.get(1)?,
        address: row.get(2)?,
        phone_number: row.get(3)?,
        education,
        experience,
    })
}
