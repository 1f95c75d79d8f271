use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::tournament::RegistrationWithAccount;
use crate::error::{Result, StorageError};
use crate::models::{Registration, RegistrationStatus, Role, Tournament};
use crate::services::registration_policy::{RegistrationRejection, check_eligibility};

pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for(&self, tournament_id: Uuid, account_id: Uuid) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE tournament_id = $1 AND account_id = $2",
        )
        .bind(tournament_id)
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(registration)
    }

    /// The account's registrations among the given tournaments.
    pub async fn for_account_in(&self, account_id: Uuid, tournament_ids: &[Uuid]) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE account_id = $1 AND tournament_id = ANY($2)",
        )
        .bind(account_id)
        .bind(tournament_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE account_id = $1 ORDER BY registration_date DESC",
        )
        .bind(account_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn list_for_tournament(&self, tournament_id: Uuid) -> Result<Vec<RegistrationWithAccount>> {
        let registrations = sqlx::query_as::<_, RegistrationWithAccount>(
            r#"
            SELECT r.registration_id, r.tournament_id, r.account_id, r.user_type, r.status,
                   r.registration_date, r.approved_at, r.approved_by, r.additional_info,
                   a.name, a.email
            FROM registrations r
            INNER JOIN accounts a ON a.account_id = r.account_id
            WHERE r.tournament_id = $1
            ORDER BY r.registration_date ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    /// Registers `account_id` for a tournament.
    ///
    /// Eligibility is evaluated against a snapshot of the tournament, then the
    /// slot is claimed with a conditional increment and the registration row is
    /// written, all inside one transaction. A full tournament therefore can
    /// never be overbooked even under concurrent attempts.
    #[tracing::instrument(skip(self, additional_info))]
    pub async fn register(
        &self,
        tournament_id: Uuid,
        account_id: Uuid,
        role: Role,
        additional_info: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        let tournament = sqlx::query_as::<_, Tournament>(
            "SELECT * FROM tournaments WHERE tournament_id = $1",
        )
        .bind(tournament_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let existing: Option<RegistrationStatus> = sqlx::query_scalar(
            "SELECT status FROM registrations WHERE tournament_id = $1 AND account_id = $2",
        )
        .bind(tournament_id)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .await?;

        check_eligibility(&tournament, role, existing, now)?;

        if !claim_slot(&mut *tx, tournament_id, role).await? {
            return Err(RegistrationRejection::NoSlots(role).into());
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (tournament_id, account_id, user_type, additional_info,
                                       registration_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tournament_id, account_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(tournament_id)
        .bind(account_id)
        .bind(role)
        .bind(&additional_info)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RegistrationRejection::AlreadyRegistered(RegistrationStatus::Pending))?;

        tx.commit().await?;

        tracing::info!(
            registration_id = %registration.registration_id,
            "Registration created"
        );

        Ok(registration)
    }

    /// Withdraws the account's pending registration and frees its slot.
    #[tracing::instrument(skip(self))]
    pub async fn withdraw(&self, tournament_id: Uuid, account_id: Uuid) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations SET status = 'withdrawn'
            WHERE tournament_id = $1 AND account_id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(tournament_id)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        release_slot(&mut *tx, tournament_id, registration.user_type).await?;

        tx.commit().await?;
        Ok(registration)
    }

    /// Admin decision on a pending registration. Rejecting frees its slot.
    #[tracing::instrument(skip(self))]
    pub async fn review(
        &self,
        registration_id: Uuid,
        target: RegistrationStatus,
        reviewer: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE registration_id = $1 FOR UPDATE",
        )
        .bind(registration_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if !current.status.can_review_to(target) {
            return Err(StorageError::ConstraintViolation(format!(
                "Registration is {} and cannot be marked {}",
                current.status, target
            )));
        }

        let updated = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $2,
                approved_at = CASE WHEN $2 = 'approved'::registration_status THEN $3 ELSE approved_at END,
                approved_by = CASE WHEN $2 = 'approved'::registration_status THEN $4 ELSE approved_by END
            WHERE registration_id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .bind(target)
        .bind(now)
        .bind(reviewer)
        .fetch_one(&mut *tx)
        .await?;

        if current.status.holds_slot() && !target.holds_slot() {
            release_slot(&mut *tx, current.tournament_id, current.user_type).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}

/// Increments the role's counter if it is still below the maximum. Returns
/// `false` when the tournament is full.
async fn claim_slot(conn: &mut PgConnection, tournament_id: Uuid, role: Role) -> Result<bool> {
    let sql = match role {
        Role::Athlete => {
            r#"
            UPDATE tournaments
            SET current_athlete_count = current_athlete_count + 1, updated_at = now()
            WHERE tournament_id = $1 AND current_athlete_count < max_athletes
            "#
        }
        Role::Coach => {
            r#"
            UPDATE tournaments
            SET current_coach_count = current_coach_count + 1, updated_at = now()
            WHERE tournament_id = $1 AND current_coach_count < max_coaches
            "#
        }
        Role::Admin => return Ok(false),
    };

    let result = sqlx::query(sql).bind(tournament_id).execute(conn).await?;
    Ok(result.rows_affected() == 1)
}

async fn release_slot(conn: &mut PgConnection, tournament_id: Uuid, role: Role) -> Result<()> {
    let sql = match role {
        Role::Athlete => {
            r#"
            UPDATE tournaments
            SET current_athlete_count = GREATEST(current_athlete_count - 1, 0), updated_at = now()
            WHERE tournament_id = $1
            "#
        }
        Role::Coach => {
            r#"
            UPDATE tournaments
            SET current_coach_count = GREATEST(current_coach_count - 1, 0), updated_at = now()
            WHERE tournament_id = $1
            "#
        }
        Role::Admin => return Ok(()),
    };

    sqlx::query(sql).bind(tournament_id).execute(conn).await?;
    Ok(())
}
