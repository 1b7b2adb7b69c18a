//! Personnel Entity
//!
//! Staff record keyed by NIP, optionally linked to a contact profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::entity::{DomainResult, Entity, RequiredFields, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personnel {
    pub id: u32,
    pub nip: String,
    pub jabatan: String,
    pub divisi: String,
    pub status: String,
    pub join_date: Option<NaiveDate>,
    pub phone_number: String,
    pub urgent_number: String,
    #[serde(rename = "profile_id")]
    pub profile_id: Option<u32>,
}

impl Entity for Personnel {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for Personnel {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("nip", &self.nip)
            .text("jabatan", &self.jabatan)
            .text("divisi", &self.divisi)
            .text("status", &self.status)
            .present("joinDate", &self.join_date)
            .text("phoneNumber", &self.phone_number)
            .text("urgentNumber", &self.urgent_number)
            .finish()
    }
}

/// Body of `PUT /api/personalia/{id}/assign-profile`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignProfile {
    pub profile_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_keeps_snake_case() {
        let p: Personnel = serde_json::from_str(
            r#"{"nip":"1987","jabatan":"Teknisi","divisi":"Produksi","status":"Aktif",
                "joinDate":"2020-02-01","phoneNumber":"0812","urgentNumber":"0813","profile_id":7}"#,
        )
        .unwrap();
        assert_eq!(p.profile_id, Some(7));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_all_fields_but_profile_required() {
        let p = Personnel {
            nip: "1987".into(),
            ..Default::default()
        };
        let err = p.validate().unwrap_err().to_string();
        assert!(err.contains("jabatan"));
        assert!(err.contains("urgentNumber"));
        assert!(!err.contains("profile"));
    }
}
