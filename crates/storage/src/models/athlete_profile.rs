use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "athlete_level", rename_all = "PascalCase")]
pub enum AthleteLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Professional,
}

impl AthleteLevel {
    pub const ALL: [AthleteLevel; 4] = [
        AthleteLevel::Beginner,
        AthleteLevel::Intermediate,
        AthleteLevel::Advanced,
        AthleteLevel::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AthleteLevel::Beginner => "Beginner",
            AthleteLevel::Intermediate => "Intermediate",
            AthleteLevel::Advanced => "Advanced",
            AthleteLevel::Professional => "Professional",
        }
    }
}

impl fmt::Display for AthleteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AthleteLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AthleteLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown level: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "achievement_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    Winning,
    Participation,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteProfile {
    pub profile_id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub sport: Option<String>,
    pub level: AthleteLevel,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub profile_image: Option<String>,
    pub is_profile_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Certificate or result document attached to an athlete profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub achievement_id: Uuid,
    pub profile_id: Uuid,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub file_name: String,
    pub file_url: String,
    pub file_size: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_defaults_to_intermediate() {
        assert_eq!(AthleteLevel::default(), AthleteLevel::Intermediate);
    }

    #[test]
    fn test_level_parse_ignores_case() {
        assert_eq!("advanced".parse::<AthleteLevel>(), Ok(AthleteLevel::Advanced));
        assert!("Elite".parse::<AthleteLevel>().is_err());
    }

    #[test]
    fn test_achievement_kind_wire_format() {
        let kind: AchievementKind = serde_json::from_str("\"winning\"").unwrap();
        assert_eq!(kind, AchievementKind::Winning);
    }
}
