use sqlx::PgPool;
use storage::{
    dto::coach_profile::{CoachDiscoveryFilter, CoachListing, RequestState},
    error::{Result, StorageError},
    models::{CoachRequest, coach_request::DEFAULT_REQUEST_MESSAGE},
    repository::{coach_profile::CoachProfileRepository, coach_request::CoachRequestRepository},
};
use uuid::Uuid;

pub async fn list_coaches(
    pool: &PgPool,
    athlete_profile_id: Uuid,
    filter: &CoachDiscoveryFilter,
) -> Result<Vec<CoachListing>> {
    let rows = CoachProfileRepository::new(pool)
        .list_for_athlete(athlete_profile_id, filter)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| CoachListing {
            profile: row.profile,
            is_verified: row.is_verified,
            request_status: RequestState::from(row.request_status),
        })
        .collect())
}

/// Opens a request to the coach with profile id `coach_profile_id`.
///
/// `NotFound` means the coach does not exist; a `Conflict` means an open
/// request already links the pair.
pub async fn send_request(
    pool: &PgPool,
    athlete_profile_id: Uuid,
    coach_profile_id: Uuid,
    message: Option<&str>,
) -> Result<CoachRequest> {
    CoachProfileRepository::new(pool)
        .find_by_id(coach_profile_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let message = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_REQUEST_MESSAGE);

    CoachRequestRepository::new(pool)
        .create(athlete_profile_id, coach_profile_id, message)
        .await
}
