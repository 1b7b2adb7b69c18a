//! Engineering Project Entity
//!
//! Rekayasa (engineering) projects with a team roster and a deadline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::entity::{check_range, DomainResult, Entity, RequiredFields, Validate};

/// Separator used when the team roster is stored as a single column
pub const TEAM_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineeringProject {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub team: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub progress: i64,
}

/// Join a roster for storage, dropping blank names
pub fn join_team(team: &[String]) -> String {
    team.iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(TEAM_SEPARATOR)
}

/// Inverse of [`join_team`]
pub fn split_team(stored: &str) -> Vec<String> {
    if stored.trim().is_empty() {
        return Vec::new();
    }
    stored.split(TEAM_SEPARATOR).map(|m| m.trim().to_string()).collect()
}

impl Entity for EngineeringProject {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Validate for EngineeringProject {
    fn validate(&self) -> DomainResult<()> {
        let members: Vec<&String> = self.team.iter().filter(|m| !m.trim().is_empty()).collect();
        RequiredFields::new()
            .text("name", &self.name)
            .present("deadline", &self.deadline)
            .non_empty("team", &members)
            .finish()?;
        check_range("progress", self.progress, 0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_storage_roundtrip() {
        let team = vec!["Andi".to_string(), " ".to_string(), "Sari ".to_string()];
        let stored = join_team(&team);
        assert_eq!(stored, "Andi, Sari");
        assert_eq!(split_team(&stored), vec!["Andi", "Sari"]);
        assert!(split_team("").is_empty());
    }

    #[test]
    fn test_blank_team_is_missing() {
        let p = EngineeringProject {
            name: "Signal System".into(),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 1),
            team: vec!["  ".into()],
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
