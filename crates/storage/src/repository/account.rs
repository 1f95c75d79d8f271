use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth::UpdateAccountRequest;
use crate::error::{Result, StorageError};
use crate::models::{Account, AccountStatus, Role, VerificationStatus};

/// Fields needed to create an account. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub role: Role,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub sport: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Outcome of an admin review of an account.
#[derive(Debug, Clone, Default)]
pub struct VerificationUpdate<'a> {
    pub rejection_reason: Option<&'a str>,
    pub certificate_url: Option<&'a str>,
    pub authority: Option<&'a str>,
}

pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, account), fields(role = %account.role))]
    pub async fn create(&self, account: &NewAccount<'_>) -> Result<Account> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (role, name, email, password_hash, sport, experience,
                                  phone, location, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(account.role)
        .bind(account.name)
        .bind(account.email)
        .bind(account.password_hash)
        .bind(account.sport)
        .bind(account.experience)
        .bind(account.phone)
        .bind(account.location)
        .bind(account.date_of_birth)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE role = $1 AND email = $2",
        )
        .bind(role)
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_optional(&self, role: Role, id: Uuid) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE role = $1 AND account_id = $2",
        )
        .bind(role)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Account> {
        self.find_optional(role, id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE accounts SET last_login = $2 WHERE account_id = $1")
            .bind(id)
            .bind(at)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update_details(
        &self,
        role: Role,
        id: Uuid,
        update: &UpdateAccountRequest,
    ) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET name = COALESCE($3, name),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                sport = COALESCE($6, sport),
                experience = COALESCE($7, experience),
                date_of_birth = COALESCE($8, date_of_birth),
                updated_at = now()
            WHERE role = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .bind(update.sport.as_deref())
        .bind(update.experience.as_deref())
        .bind(update.date_of_birth)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    pub async fn update_name(&self, role: Role, id: Uuid, name: &str) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET name = $3, updated_at = now()
            WHERE role = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_status(&self, role: Role, id: Uuid, status: AccountStatus) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET status = $3, updated_at = now()
            WHERE role = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn set_verification(
        &self,
        role: Role,
        id: Uuid,
        verification: VerificationStatus,
        update: &VerificationUpdate<'_>,
    ) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET verification = $3,
                rejection_reason = $4,
                verified_certificate_url = COALESCE($5, verified_certificate_url),
                verified_authority = COALESCE($6, verified_authority),
                updated_at = now()
            WHERE role = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(id)
        .bind(verification)
        .bind(update.rejection_reason)
        .bind(update.certificate_url)
        .bind(update.authority)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(account)
    }

    /// Deletes the account and everything hanging off it. Tournament slots held
    /// by the account's live registrations are released first.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, role: Role, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE tournaments t
            SET current_athlete_count = GREATEST(
                    t.current_athlete_count - CASE WHEN r.user_type = 'athlete' THEN 1 ELSE 0 END, 0),
                current_coach_count = GREATEST(
                    t.current_coach_count - CASE WHEN r.user_type = 'coach' THEN 1 ELSE 0 END, 0),
                updated_at = now()
            FROM registrations r
            WHERE r.tournament_id = t.tournament_id
              AND r.account_id = $1
              AND r.status IN ('pending', 'approved')
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM accounts WHERE role = $1 AND account_id = $2")
            .bind(role)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    /// Stores a reset token digest for the account with this email, returning
    /// the account when one exists.
    #[tracing::instrument(skip(self, email, token_hash))]
    pub async fn set_reset_token(
        &self,
        role: Role,
        email: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET reset_token_hash = $3, reset_token_expires_at = $4
            WHERE role = $1 AND email = $2
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(email)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    pub async fn clear_reset_token(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE accounts SET reset_token_hash = NULL, reset_token_expires_at = NULL WHERE account_id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Swaps in a new password if `token_hash` matches an unexpired token, and
    /// burns the token in the same statement.
    #[tracing::instrument(skip(self, token_hash, password_hash))]
    pub async fn consume_reset_token(
        &self,
        role: Role,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET password_hash = $3,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                updated_at = now()
            WHERE role = $1
              AND reset_token_hash = $2
              AND reset_token_expires_at > $4
            RETURNING *
            "#,
        )
        .bind(role)
        .bind(token_hash)
        .bind(password_hash)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }
}
