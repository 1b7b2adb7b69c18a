//! Profile Entity
//!
//! Contact details with the most recent education and work experience.

use serde::{Deserialize, Serialize};
use super::entity::{DomainResult, Entity, RequiredFields, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub position: String,
    pub period: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub id: u32,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub education: Option<Education>,
    pub experience: Option<Experience>,
}

impl Entity for Profile {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for Profile {
    fn validate(&self) -> DomainResult<()> {
        RequiredFields::new()
            .text("email", &self.email)
            .text("address", &self.address)
            .text("phoneNumber", &self.phone_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_sections_are_optional() {
        let p: Profile = serde_json::from_str(
            r#"{"email":"a@b.c","address":"Bandung","phoneNumber":"0812",
                "education":{"degree":"S1","university":"ITB","year":"2015"}}"#,
        )
        .unwrap();
        assert_eq!(p.education.as_ref().map(|e| e.degree.as_str()), Some("S1"));
        assert!(p.experience.is_none());
        assert!(p.validate().is_ok());
    }
}
