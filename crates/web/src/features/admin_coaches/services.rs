use sqlx::PgPool;
use storage::{
    dto::admin::{CoachDetail, CoachStats, VerifyCertificateRequest},
    error::Result,
    models::{Account, Role, VerificationStatus},
    repository::{
        account::{AccountRepository, VerificationUpdate},
        admin::AdminRepository,
        coach_profile::CoachProfileRepository,
    },
    services::certificates::verify_certificate,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub const SEARCH_LIMIT: i64 = 50;

pub async fn coach_detail(pool: &PgPool, account_id: Uuid) -> Result<CoachDetail> {
    let account = AccountRepository::new(pool)
        .find_by_id(Role::Coach, account_id)
        .await?;
    let profile = CoachProfileRepository::new(pool)
        .find_by_account(account_id)
        .await?;

    Ok(CoachDetail {
        verified_certificate_url: account.verified_certificate_url.clone(),
        verified_authority: account.verified_authority.clone(),
        rejection_reason: account.rejection_reason.clone(),
        account: account.into(),
        profile,
    })
}

pub async fn coach_stats(pool: &PgPool) -> Result<CoachStats> {
    let admin = AdminRepository::new(pool);
    let (total, verified, pending_review, rejected) = admin.coach_counts().await?;

    Ok(CoachStats {
        total,
        verified,
        pending_review,
        rejected,
        by_sport: admin.accounts_by_sport(Role::Coach).await?,
    })
}

/// Checks the certificate against the catalogue and, when recognised, marks
/// the coach verified with the certificate URL and issuing authority.
pub async fn verify_with_certificate(
    pool: &PgPool,
    account_id: Uuid,
    req: &VerifyCertificateRequest,
) -> WebResult<Account> {
    let authority = verify_certificate(&req.sport, &req.certificate_name)
        .map_err(|e| WebError::bad_request(e.to_string()))?;

    let update = VerificationUpdate {
        rejection_reason: None,
        certificate_url: Some(req.certificate_url.as_str()),
        authority: Some(authority),
    };

    let account = AccountRepository::new(pool)
        .set_verification(Role::Coach, account_id, VerificationStatus::Verified, &update)
        .await?;

    tracing::info!(account_id = %account_id, authority, "Coach verified by certificate");
    Ok(account)
}
