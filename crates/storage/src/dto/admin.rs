use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth::AccountResponse;
use crate::dto::common::{CountBucket, PaginationParams};
use crate::models::{
    AccountStatus, Achievement, AthleteLevel, AthleteProfile, CoachProfile, VerificationStatus,
};

/// Query parameters for the admin athlete listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AthleteListQuery {
    pub sport: Option<String>,
    pub level: Option<AthleteLevel>,
    pub status: Option<AccountStatus>,
    /// Matches name, email or sport
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl AthleteListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

/// Athlete row in the admin listing: the account joined with its profile, if any.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteSummary {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub sport: Option<String>,
    pub experience: Option<String>,
    pub status: AccountStatus,
    pub verification: VerificationStatus,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub level: Option<AthleteLevel>,
    pub profile_image: Option<String>,
    pub is_profile_complete: Option<bool>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteDetail {
    pub account: AccountResponse,
    pub profile: Option<AthleteProfile>,
    pub achievements: Vec<Achievement>,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteStats {
    pub total: i64,
    pub active: i64,
    pub verified: i64,
    pub by_level: Vec<CountBucket>,
    pub by_sport: Vec<CountBucket>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AthleteFilterOptions {
    pub sports: Vec<String>,
    pub levels: Vec<AthleteLevel>,
    pub statuses: Vec<AccountStatus>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAccountStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CoachSort {
    #[default]
    Newest,
    Name,
    Rate,
}

/// Query parameters for the admin coach listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CoachListQuery {
    /// Matches name, email, bio or certifications
    pub search: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub sort_by: Option<CoachSort>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CoachListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CoachSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Coach row in admin listings: the account joined with its profile, if any.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachSummary {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub sport: Option<String>,
    pub experience: Option<String>,
    pub status: AccountStatus,
    pub verification: VerificationStatus,
    pub profile_id: Option<Uuid>,
    pub bio: Option<String>,
    pub sports: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub hourly_rate: Option<Decimal>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachDetail {
    pub account: AccountResponse,
    pub verified_certificate_url: Option<String>,
    pub verified_authority: Option<String>,
    pub rejection_reason: Option<String>,
    pub profile: Option<CoachProfile>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachStats {
    pub total: i64,
    pub verified: i64,
    pub pending_review: i64,
    pub rejected: i64,
    pub by_sport: Vec<CountBucket>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RejectCoachRequest {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCertificateRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Sport is required"))]
    pub sport: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Certificate name is required"))]
    pub certificate_name: String,

    #[serde(default)]
    #[validate(url(message = "Certificate file required"))]
    pub certificate_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coach_sort_parses_lowercase() {
        let q: CoachListQuery = serde_json::from_str(r#"{"sortBy":"rate"}"#).unwrap();
        assert_eq!(q.sort_by, Some(CoachSort::Rate));
    }

    #[test]
    fn test_certificate_request_requires_url() {
        let req = VerifyCertificateRequest {
            sport: "Tennis".into(),
            certificate_name: "ITF Play Tennis Course".into(),
            certificate_url: "not a url".into(),
        };
        assert!(req.validate().is_err());
    }
}
