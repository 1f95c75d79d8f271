use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::coach_profile::{CoachDiscoveryFilter, UpdateCoachProfileRequest};
use crate::dto::common::like_pattern;
use crate::error::{Result, StorageError};
use crate::models::{Account, CoachProfile, RequestStatus};

/// Coach profile paired with its account's review state and the viewing
/// athlete's latest request, for the discovery listing.
#[derive(Debug, sqlx::FromRow)]
pub struct CoachListingRow {
    #[sqlx(flatten)]
    pub profile: CoachProfile,
    pub is_verified: bool,
    pub request_status: Option<RequestStatus>,
}

pub struct CoachProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CoachProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<CoachProfile>> {
        let profile =
            sqlx::query_as::<_, CoachProfile>("SELECT * FROM coach_profiles WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(profile)
    }

    pub async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<CoachProfile>> {
        let profile =
            sqlx::query_as::<_, CoachProfile>("SELECT * FROM coach_profiles WHERE profile_id = $1")
                .bind(profile_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(profile)
    }

    /// Returns the coach's profile, seeding it from the account on first access.
    #[tracing::instrument(skip(self, account), fields(account_id = %account.account_id))]
    pub async fn get_or_create(&self, account: &Account) -> Result<CoachProfile> {
        let sports: Vec<String> = account.sport.iter().cloned().collect();

        sqlx::query(
            r#"
            INSERT INTO coach_profiles (account_id, name, email, phone, location, sports, experience)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (account_id) DO NOTHING
            "#,
        )
        .bind(account.account_id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.phone.as_deref())
        .bind(account.location.as_deref())
        .bind(&sports)
        .bind(account.experience.as_deref())
        .execute(self.pool)
        .await?;

        self.find_by_account(account.account_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        account_id: Uuid,
        update: &UpdateCoachProfileRequest,
    ) -> Result<CoachProfile> {
        sqlx::query_as::<_, CoachProfile>(
            r#"
            UPDATE coach_profiles
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                location = COALESCE($4, location),
                bio = COALESCE($5, bio),
                sports = COALESCE($6, sports),
                certifications = COALESCE($7, certifications),
                hourly_rate = COALESCE($8, hourly_rate),
                experience = COALESCE($9, experience),
                availability = COALESCE($10, availability),
                achievements = COALESCE($11, achievements),
                profile_image = COALESCE($12, profile_image),
                updated_at = now()
            WHERE account_id = $1
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.sports.as_deref())
        .bind(update.certifications.as_deref())
        .bind(update.hourly_rate)
        .bind(update.experience.as_deref())
        .bind(update.availability.as_deref())
        .bind(update.achievements.as_deref())
        .bind(update.profile_image.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Active coaches' profiles with the given athlete's latest request status for each.
    pub async fn list_for_athlete(
        &self,
        athlete_profile_id: Uuid,
        filter: &CoachDiscoveryFilter,
    ) -> Result<Vec<CoachListingRow>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT cp.*,
                   a.verification = 'verified' AS is_verified,
                   (SELECT cr.status FROM coach_requests cr
                     WHERE cr.coach_profile_id = cp.profile_id
                       AND cr.athlete_profile_id = "#,
        );
        query.push_bind(athlete_profile_id);
        query.push(
            r#"
                     ORDER BY cr.created_at DESC
                     LIMIT 1) AS request_status
            FROM coach_profiles cp
            INNER JOIN accounts a ON a.account_id = cp.account_id
            WHERE a.status = 'active'
            "#,
        );

        if let Some(sport) = filter.sport.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(" AND EXISTS (SELECT 1 FROM unnest(cp.sports) s WHERE s ILIKE ");
            query.push_bind(sport.trim().to_string());
            query.push(")");
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            query.push(" AND (cp.name ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR cp.location ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR cp.bio ILIKE ");
            query.push_bind(pattern);
            query.push(")");
        }

        query.push(" ORDER BY (a.verification = 'verified') DESC, cp.created_at DESC");

        let rows = query
            .build_query_as::<CoachListingRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}
