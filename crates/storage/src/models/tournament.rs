use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tournament_sport")]
pub enum Sport {
    Basketball,
    Football,
    Tennis,
    Badminton,
    Swimming,
    Cricket,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 7] = [
        Sport::Basketball,
        Sport::Football,
        Sport::Tennis,
        Sport::Badminton,
        Sport::Swimming,
        Sport::Cricket,
        Sport::Volleyball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "Basketball",
            Sport::Football => "Football",
            Sport::Tennis => "Tennis",
            Sport::Badminton => "Badminton",
            Sport::Swimming => "Swimming",
            Sport::Cricket => "Cricket",
            Sport::Volleyball => "Volleyball",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tournament_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tournament_visibility", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    InviteOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub tournament_id: Uuid,
    pub name: String,
    pub sport: Sport,
    pub date: DateTime<Utc>,
    pub participants: i32,
    pub status: TournamentStatus,
    pub location: String,
    pub prize: String,
    pub organizer: String,
    pub description: Option<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub is_active: bool,
    pub visibility: Visibility,
    pub allowed_user_types: Vec<Role>,
    pub max_coaches: i32,
    pub max_athletes: i32,
    pub current_coach_count: i32,
    pub current_athlete_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_user_types.contains(&role)
    }

    /// `(current, max)` slot counters for a competing role.
    pub fn capacity_for(&self, role: Role) -> Option<(i32, i32)> {
        match role {
            Role::Athlete => Some((self.current_athlete_count, self.max_athletes)),
            Role::Coach => Some((self.current_coach_count, self.max_coaches)),
            Role::Admin => None,
        }
    }

    pub fn has_slot_for(&self, role: Role) -> bool {
        self.capacity_for(role)
            .is_some_and(|(current, max)| current < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Visibility::InviteOnly).unwrap(),
            "\"invite-only\""
        );
    }

    #[test]
    fn test_sport_names_are_capitalized() {
        let sport: Sport = serde_json::from_str("\"Badminton\"").unwrap();
        assert_eq!(sport, Sport::Badminton);
        assert!(serde_json::from_str::<Sport>("\"badminton\"").is_err());
    }
}
