use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::admin::{AthleteDetail, AthleteFilterOptions, AthleteStats},
    error::Result,
    models::{AccountStatus, AthleteLevel, Role, account::age_on},
    repository::{
        account::AccountRepository, admin::AdminRepository,
        athlete_profile::AthleteProfileRepository,
    },
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Account merged with its profile and achievements. The profile may not
/// exist yet if the athlete never opened it.
pub async fn athlete_detail(pool: &PgPool, account_id: Uuid, today: NaiveDate) -> Result<AthleteDetail> {
    let account = AccountRepository::new(pool)
        .find_by_id(Role::Athlete, account_id)
        .await?;

    let profiles = AthleteProfileRepository::new(pool);
    let profile = profiles.find_by_account(account_id).await?;
    let achievements = match &profile {
        Some(profile) => profiles.list_achievements(profile.profile_id).await?,
        None => Vec::new(),
    };

    Ok(AthleteDetail {
        age: account.date_of_birth.and_then(|dob| age_on(dob, today)),
        account: account.into(),
        profile,
        achievements,
    })
}

pub async fn athlete_stats(pool: &PgPool) -> Result<AthleteStats> {
    let admin = AdminRepository::new(pool);
    let (total, active, verified) = admin.athlete_counts().await?;

    Ok(AthleteStats {
        total,
        active,
        verified,
        by_level: admin.athletes_by_level().await?,
        by_sport: admin.accounts_by_sport(Role::Athlete).await?,
    })
}

pub async fn filter_options(pool: &PgPool) -> Result<AthleteFilterOptions> {
    Ok(AthleteFilterOptions {
        sports: AdminRepository::new(pool).athlete_sports().await?,
        levels: AthleteLevel::ALL.to_vec(),
        statuses: vec![
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::Suspended,
        ],
    })
}

pub fn assignable_status(raw: &str) -> WebResult<AccountStatus> {
    AccountStatus::parse_admin_assignable(raw.trim())
        .ok_or_else(|| WebError::bad_request("Invalid status"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignable_status() {
        assert_eq!(assignable_status("suspended").unwrap(), AccountStatus::Suspended);
        assert_eq!(assignable_status(" active ").unwrap(), AccountStatus::Active);
    }

    #[test]
    fn test_pending_is_not_assignable() {
        let err = assignable_status("pending").unwrap_err();
        assert!(matches!(err, WebError::BadRequest(ref m) if m == "Invalid status"));
    }
}
