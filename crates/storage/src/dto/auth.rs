use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Account, AccountStatus, Role, VerificationStatus};

pub const EXPERIENCE_BANDS: &[&str] = &["0-1", "1-3", "3-5", "5-10", "10+"];

/// Request payload for athlete signup
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteSignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Sport is required"))]
    pub sport: String,

    #[serde(default)]
    #[validate(custom(function = "validate_experience"))]
    pub experience: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
}

/// Request payload for coach signup
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachSignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Sport is required"))]
    pub sport: String,

    #[validate(length(max = 50))]
    pub experience: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Request payload for admin signup
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminSignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Request payload for athletes editing their own account record
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub sport: Option<String>,

    #[validate(custom(function = "validate_experience"))]
    pub experience: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,
}

/// Account as exposed over the API. Credentials and reset state never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    pub is_verified: bool,
    pub verification: VerificationStatus,
    pub sport: Option<String>,
    pub experience: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            is_verified: account.is_verified(),
            id: account.account_id,
            role: account.role,
            name: account.name,
            email: account.email,
            status: account.status,
            verification: account.verification,
            sport: account.sport,
            experience: account.experience,
            phone: account.phone,
            location: account.location,
            date_of_birth: account.date_of_birth,
            last_login: account.last_login,
            created_at: account.created_at,
        }
    }
}

/// Returned by signup and login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_profile: Option<bool>,
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_experience(experience: &str) -> Result<(), validator::ValidationError> {
    if EXPERIENCE_BANDS.contains(&experience) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_experience");
        err.message = Some("Experience must be one of 0-1, 1-3, 3-5, 5-10, 10+".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> AthleteSignupRequest {
        AthleteSignupRequest {
            name: "Asha".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
            sport: "Tennis".into(),
            experience: "1-3".into(),
            phone: None,
            location: None,
            date_of_birth: None,
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = signup();
        req.password = "12345".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_unknown_experience_band_rejected() {
        let mut req = signup();
        req.experience = "20+".into();
        assert!(req.validate().unwrap_err().field_errors().contains_key("experience"));
    }

    #[test]
    fn test_missing_fields_deserialize_then_fail_validation() {
        let req: AthleteSignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("sport"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req = LoginRequest {
            email: "a@x.com".into(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }
}
