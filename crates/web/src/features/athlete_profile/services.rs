use sqlx::PgPool;
use storage::{
    dto::athlete_profile::AthleteProfileResponse,
    error::Result,
    models::{AthleteProfile, Role},
    repository::{account::AccountRepository, athlete_profile::AthleteProfileRepository},
};
use uuid::Uuid;

/// The athlete's profile, created from the account on first access.
pub async fn ensure_profile(pool: &PgPool, account_id: Uuid) -> Result<AthleteProfile> {
    let repo = AthleteProfileRepository::new(pool);
    if let Some(profile) = repo.find_by_account(account_id).await? {
        return Ok(profile);
    }

    let account = AccountRepository::new(pool)
        .find_by_id(Role::Athlete, account_id)
        .await?;
    tracing::info!(%account_id, "Creating athlete profile on first access");
    repo.get_or_create(&account).await
}

pub async fn with_achievements(pool: &PgPool, profile: AthleteProfile) -> Result<AthleteProfileResponse> {
    let achievements = AthleteProfileRepository::new(pool)
        .list_achievements(profile.profile_id)
        .await?;

    Ok(AthleteProfileResponse {
        profile,
        achievements,
    })
}
