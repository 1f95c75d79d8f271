use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::coach_request::{RequestWithAthlete, RequestWithCoach};
use crate::error::{Result, StorageError};
use crate::models::{AthleteProfile, CoachRequest, RequestStatus};

pub struct CoachRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CoachRequestRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The pending or accepted request between this pair, if one exists.
    pub async fn find_open(
        &self,
        athlete_profile_id: Uuid,
        coach_profile_id: Uuid,
    ) -> Result<Option<CoachRequest>> {
        let request = sqlx::query_as::<_, CoachRequest>(
            r#"
            SELECT * FROM coach_requests
            WHERE athlete_profile_id = $1
              AND coach_profile_id = $2
              AND status IN ('pending', 'accepted')
            "#,
        )
        .bind(athlete_profile_id)
        .bind(coach_profile_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(request)
    }

    /// Opens a new request. A second open request for the same pair is a
    /// `Conflict`, whether caught by the lookup or by the partial unique index.
    #[tracing::instrument(skip(self, message))]
    pub async fn create(
        &self,
        athlete_profile_id: Uuid,
        coach_profile_id: Uuid,
        message: &str,
    ) -> Result<CoachRequest> {
        if let Some(open) = self.find_open(athlete_profile_id, coach_profile_id).await? {
            return Err(StorageError::Conflict(format!("Request already {}", open.status)));
        }

        sqlx::query_as::<_, CoachRequest>(
            r#"
            INSERT INTO coach_requests (athlete_profile_id, coach_profile_id, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(athlete_profile_id)
        .bind(coach_profile_id)
        .bind(message)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Request already pending"))
    }

    /// Resolves a pending request addressed to `coach_profile_id`.
    ///
    /// The row is locked for the transaction, so a concurrent resolution waits
    /// and then sees the terminal status.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(
        &self,
        request_id: Uuid,
        coach_profile_id: Uuid,
        target: RequestStatus,
    ) -> Result<CoachRequest> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, CoachRequest>(
            r#"
            SELECT * FROM coach_requests
            WHERE request_id = $1 AND coach_profile_id = $2
            FOR UPDATE
            "#,
        )
        .bind(request_id)
        .bind(coach_profile_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let next = current.status.resolve(target)?;

        let updated = sqlx::query_as::<_, CoachRequest>(
            r#"
            UPDATE coach_requests
            SET status = $2, updated_at = now()
            WHERE request_id = $1
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_for_coach(
        &self,
        coach_profile_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<RequestWithAthlete>> {
        let requests = sqlx::query_as::<_, RequestWithAthlete>(
            r#"
            SELECT cr.request_id, cr.status, cr.message, cr.created_at, cr.updated_at,
                   ap.profile_id AS athlete_profile_id,
                   ap.name AS athlete_name,
                   ap.email AS athlete_email,
                   ap.sport AS athlete_sport,
                   ap.level AS athlete_level,
                   ap.location AS athlete_location,
                   ap.profile_image AS athlete_profile_image
            FROM coach_requests cr
            INNER JOIN athlete_profiles ap ON ap.profile_id = cr.athlete_profile_id
            WHERE cr.coach_profile_id = $1
              AND ($2::request_status IS NULL OR cr.status = $2)
            ORDER BY cr.created_at DESC
            "#,
        )
        .bind(coach_profile_id)
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_for_athlete(&self, athlete_profile_id: Uuid) -> Result<Vec<RequestWithCoach>> {
        let requests = sqlx::query_as::<_, RequestWithCoach>(
            r#"
            SELECT cr.request_id, cr.status, cr.message, cr.created_at, cr.updated_at,
                   cp.profile_id AS coach_profile_id,
                   cp.name AS coach_name,
                   cp.email AS coach_email,
                   cp.sports AS coach_sports,
                   cp.location AS coach_location,
                   cp.profile_image AS coach_profile_image
            FROM coach_requests cr
            INNER JOIN coach_profiles cp ON cp.profile_id = cr.coach_profile_id
            WHERE cr.athlete_profile_id = $1
            ORDER BY cr.created_at DESC
            "#,
        )
        .bind(athlete_profile_id)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }

    /// Athletes whose requests this coach has accepted, most recent first.
    pub async fn accepted_athletes(&self, coach_profile_id: Uuid) -> Result<Vec<AthleteProfile>> {
        let athletes = sqlx::query_as::<_, AthleteProfile>(
            r#"
            SELECT ap.*
            FROM coach_requests cr
            INNER JOIN athlete_profiles ap ON ap.profile_id = cr.athlete_profile_id
            WHERE cr.coach_profile_id = $1 AND cr.status = 'accepted'
            ORDER BY cr.updated_at DESC
            "#,
        )
        .bind(coach_profile_id)
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }
}
