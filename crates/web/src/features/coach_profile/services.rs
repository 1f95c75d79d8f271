use sqlx::PgPool;
use storage::{
    dto::{auth::UpdateAccountRequest, coach_profile::UpdateCoachProfileRequest},
    error::Result,
    models::{CoachProfile, Role},
    repository::{account::AccountRepository, coach_profile::CoachProfileRepository},
};
use uuid::Uuid;

/// The coach's profile, created from the account on first access.
pub async fn ensure_profile(pool: &PgPool, account_id: Uuid) -> Result<CoachProfile> {
    let repo = CoachProfileRepository::new(pool);
    if let Some(profile) = repo.find_by_account(account_id).await? {
        return Ok(profile);
    }

    let account = AccountRepository::new(pool)
        .find_by_id(Role::Coach, account_id)
        .await?;
    tracing::info!(%account_id, "Creating coach profile on first access");
    repo.get_or_create(&account).await
}

/// Saves the profile form and mirrors the contact fields onto the account.
pub async fn update_profile(
    pool: &PgPool,
    account_id: Uuid,
    update: &UpdateCoachProfileRequest,
) -> Result<CoachProfile> {
    ensure_profile(pool, account_id).await?;
    let profile = CoachProfileRepository::new(pool)
        .update(account_id, update)
        .await?;

    let mirrored = UpdateAccountRequest {
        name: update.name.clone(),
        phone: update.phone.clone(),
        location: update.location.clone(),
        sport: None,
        experience: update.experience.clone(),
        date_of_birth: None,
    };
    AccountRepository::new(pool)
        .update_details(Role::Coach, account_id, &mirrored)
        .await?;

    Ok(profile)
}
