//! Maintenance team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceTeam {
    pub id: i32,
    pub name: String,
    pub company_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Member as embedded in the team list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberRef {
    pub id: i32,
    pub name: String,
}

/// Member as returned with a single team
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Team list entry
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceTeamSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub team: MaintenanceTeam,
    pub company_name: Option<String>,
    /// Members ordered by name
    #[schema(value_type = Vec<TeamMemberRef>)]
    pub members: Json<Vec<TeamMemberRef>>,
    /// Number of open requests assigned to the team
    pub request_count: i64,
}

/// Single team with its members
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaintenanceTeamDetails {
    #[serde(flatten)]
    pub team: MaintenanceTeam,
    pub members: Vec<TeamMember>,
}

/// Team payload used by both create and update. On update the membership is
/// replaced by `member_ids`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MaintenanceTeamInput {
    #[validate(length(min = 1, message = "Team name is required"))]
    pub name: String,
    pub company_id: Option<i32>,
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

impl MaintenanceTeamInput {
    /// Member ids without duplicates, first occurrence wins
    pub fn distinct_member_ids(&self) -> Vec<i32> {
        let mut seen = std::collections::HashSet::new();
        self.member_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_member_ids() {
        let input = MaintenanceTeamInput {
            name: "Mechanics".to_string(),
            company_id: None,
            member_ids: vec![3, 2, 3, 5, 2],
        };
        assert_eq!(input.distinct_member_ids(), vec![3, 2, 5]);
    }

    #[test]
    fn test_member_ids_default_empty() {
        let input: MaintenanceTeamInput = serde_json::from_str(r#"{"name": "IT"}"#).unwrap();
        assert!(input.member_ids.is_empty());
    }
}
