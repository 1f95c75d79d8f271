use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{CoachProfile, RequestStatus};

/// Request payload for updating a coach profile. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoachProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Bio cannot exceed 1000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 20))]
    pub sports: Option<Vec<String>>,

    #[validate(length(max = 50))]
    pub certifications: Option<Vec<String>>,

    #[validate(custom(function = "validate_rate"))]
    pub hourly_rate: Option<Decimal>,

    #[validate(length(max = 50))]
    pub experience: Option<String>,

    #[validate(length(max = 255))]
    pub availability: Option<String>,

    #[validate(length(max = 50))]
    pub achievements: Option<Vec<String>>,

    #[validate(url)]
    pub profile_image: Option<String>,
}

/// Query parameters for the athlete-facing coach listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CoachDiscoveryFilter {
    /// Matches any of the coach's sports, case-insensitively
    pub sport: Option<String>,
    /// Free text over name, location and bio
    pub search: Option<String>,
}

/// Relationship between the calling athlete and a listed coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    NotSent,
    Pending,
    Accepted,
    Rejected,
}

impl From<Option<RequestStatus>> for RequestState {
    fn from(status: Option<RequestStatus>) -> Self {
        match status {
            None => RequestState::NotSent,
            Some(RequestStatus::Pending) => RequestState::Pending,
            Some(RequestStatus::Accepted) => RequestState::Accepted,
            Some(RequestStatus::Rejected) => RequestState::Rejected,
        }
    }
}

/// Coach as listed to athletes browsing for a coach.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachListing {
    #[serde(flatten)]
    pub profile: CoachProfile,
    pub is_verified: bool,
    pub request_status: RequestState,
}

fn validate_rate(rate: &Decimal) -> Result<(), validator::ValidationError> {
    if rate.is_sign_negative() {
        let mut err = validator::ValidationError::new("negative_rate");
        err.message = Some("Hourly rate cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_state_wire_names() {
        assert_eq!(
            serde_json::to_string(&RequestState::from(None)).unwrap(),
            "\"not_sent\""
        );
        assert_eq!(
            RequestState::from(Some(RequestStatus::Accepted)),
            RequestState::Accepted
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let req = UpdateCoachProfileRequest {
            hourly_rate: Some(Decimal::new(-500, 2)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateCoachProfileRequest::default().validate().is_ok());
    }
}
