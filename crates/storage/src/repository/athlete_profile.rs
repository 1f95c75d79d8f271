use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::athlete_profile::{AddAchievementRequest, UpdateAthleteProfileRequest};
use crate::error::{Result, StorageError};
use crate::models::{Account, Achievement, AthleteProfile};

pub const DEFAULT_FILE_SIZE: &str = "0 MB";

pub struct AthleteProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<AthleteProfile>> {
        let profile = sqlx::query_as::<_, AthleteProfile>(
            "SELECT * FROM athlete_profiles WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn find_by_id(&self, profile_id: Uuid) -> Result<AthleteProfile> {
        sqlx::query_as::<_, AthleteProfile>("SELECT * FROM athlete_profiles WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Returns the athlete's profile, seeding it from the account on first access.
    #[tracing::instrument(skip(self, account), fields(account_id = %account.account_id))]
    pub async fn get_or_create(&self, account: &Account) -> Result<AthleteProfile> {
        sqlx::query(
            r#"
            INSERT INTO athlete_profiles (account_id, name, email, phone, location, sport, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (account_id) DO NOTHING
            "#,
        )
        .bind(account.account_id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.phone.as_deref())
        .bind(account.location.as_deref())
        .bind(account.sport.as_deref())
        .bind(account.date_of_birth)
        .execute(self.pool)
        .await?;

        self.find_by_account(account.account_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Saves the profile form and mirrors name and sport onto the account.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        account_id: Uuid,
        update: &UpdateAthleteProfileRequest,
    ) -> Result<AthleteProfile> {
        let mut tx = self.pool.begin().await?;

        let profile = sqlx::query_as::<_, AthleteProfile>(
            r#"
            UPDATE athlete_profiles
            SET name = $2,
                sport = $3,
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                level = COALESCE($6, level),
                bio = COALESCE($7, bio),
                date_of_birth = COALESCE($8, date_of_birth),
                height = COALESCE($9, height),
                weight = COALESCE($10, weight),
                profile_image = COALESCE($11, profile_image),
                is_profile_complete = TRUE,
                updated_at = now()
            WHERE account_id = $1
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(update.name.trim())
        .bind(update.sport.trim())
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .bind(update.level)
        .bind(update.bio.as_deref())
        .bind(update.date_of_birth)
        .bind(update.height)
        .bind(update.weight)
        .bind(update.profile_image.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        sqlx::query(
            "UPDATE accounts SET name = $2, sport = $3, updated_at = now() WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(&profile.name)
        .bind(profile.sport.as_deref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile)
    }

    pub async fn set_image(&self, account_id: Uuid, image_url: &str) -> Result<AthleteProfile> {
        sqlx::query_as::<_, AthleteProfile>(
            r#"
            UPDATE athlete_profiles SET profile_image = $2, updated_at = now()
            WHERE account_id = $1
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn list_achievements(&self, profile_id: Uuid) -> Result<Vec<Achievement>> {
        let achievements = sqlx::query_as::<_, Achievement>(
            "SELECT * FROM athlete_achievements WHERE profile_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(profile_id)
        .fetch_all(self.pool)
        .await?;

        Ok(achievements)
    }

    #[tracing::instrument(skip(self, achievement))]
    pub async fn add_achievement(
        &self,
        profile_id: Uuid,
        achievement: &AddAchievementRequest,
    ) -> Result<Achievement> {
        let created = sqlx::query_as::<_, Achievement>(
            r#"
            INSERT INTO athlete_achievements (profile_id, kind, file_name, file_url, file_size)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(achievement.kind)
        .bind(&achievement.file_name)
        .bind(&achievement.file_url)
        .bind(achievement.file_size.as_deref().unwrap_or(DEFAULT_FILE_SIZE))
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_achievement(&self, profile_id: Uuid, achievement_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM athlete_achievements WHERE profile_id = $1 AND achievement_id = $2",
        )
        .bind(profile_id)
        .bind(achievement_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
