use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::{AccountStatus, Role, VerificationStatus};

/// Login credential record shared by the three roles. Role-specific columns
/// are simply left empty for the roles that do not use them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: Uuid,
    pub role: Role,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: AccountStatus,
    pub verification: VerificationStatus,
    pub rejection_reason: Option<String>,
    pub verified_certificate_url: Option<String>,
    pub verified_authority: Option<String>,
    pub sport: Option<String>,
    pub experience: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_verified(&self) -> bool {
        self.verification == VerificationStatus::Verified
    }
}

/// Whole years between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(date_of_birth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            account_id: Uuid::new_v4(),
            role: Role::Athlete,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            status: AccountStatus::Active,
            verification: VerificationStatus::Unverified,
            rejection_reason: None,
            verified_certificate_url: None,
            verified_authority: None,
            sport: Some("Tennis".into()),
            experience: Some("1-3".into()),
            phone: None,
            location: None,
            date_of_birth: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_age_on_counts_whole_years() {
        let dob = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), Some(23));
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), Some(24));
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()), None);
    }
}
