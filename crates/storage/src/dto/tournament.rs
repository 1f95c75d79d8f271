use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dto::common::PaginationParams;
use crate::models::{
    Registration, RegistrationStatus, Role, Sport, Tournament, TournamentStatus, Visibility,
};

pub const DEFAULT_MAX_COACHES: i32 = 10;
pub const DEFAULT_MAX_ATHLETES: i32 = 100;

/// Request payload for creating a tournament
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_deadline"))]
pub struct CreateTournamentRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Tournament name is required and cannot exceed 100 characters"))]
    pub name: String,

    pub sport: Sport,

    pub date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Participants must be at least 1"))]
    pub participants: i32,

    pub status: Option<TournamentStatus>,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Prize is required"))]
    pub prize: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Organizer is required"))]
    pub organizer: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    pub registration_deadline: Option<DateTime<Utc>>,

    pub visibility: Option<Visibility>,

    #[validate(custom(function = "validate_user_types"))]
    pub allowed_user_types: Option<Vec<Role>>,

    #[validate(range(min = 0))]
    pub max_coaches: Option<i32>,

    #[validate(range(min = 0))]
    pub max_athletes: Option<i32>,

    pub is_active: Option<bool>,
}

/// Partial update of a tournament
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub sport: Option<Sport>,
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    pub participants: Option<i32>,
    pub status: Option<TournamentStatus>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub prize: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub organizer: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub visibility: Option<Visibility>,
    #[validate(custom(function = "validate_user_types"))]
    pub allowed_user_types: Option<Vec<Role>>,
    #[validate(range(min = 0))]
    pub max_coaches: Option<i32>,
    #[validate(range(min = 0))]
    pub max_athletes: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query parameters for tournament listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TournamentListQuery {
    /// Matches name, location or organizer
    pub search: Option<String>,
    pub status: Option<TournamentStatus>,
    pub sport: Option<Sport>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TournamentListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

/// Resolved filter handed to the repository.
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub search: Option<String>,
    pub status: Option<TournamentStatus>,
    pub sport: Option<Sport>,
    pub allowed_role: Option<Role>,
    pub active_only: bool,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTournamentRequest {
    #[schema(value_type = Object)]
    pub additional_info: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRegistrationStatus {
    pub status: RegistrationStatus,
}

/// Tournament annotated with the caller's own registration, if any.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentWithRegistration {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub user_registration: Option<Registration>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithTournament {
    #[serde(flatten)]
    pub registration: Registration,
    pub tournament: Tournament,
}

/// Registration row joined with the registrant's account, for admins.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithAccount {
    pub registration_id: Uuid,
    pub tournament_id: Uuid,
    pub account_id: Uuid,
    pub user_type: Role,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    #[schema(value_type = Object)]
    pub additional_info: serde_json::Value,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TournamentStats {
    pub total: i64,
    pub active: i64,
    pub upcoming: i64,
    pub completed: i64,
}

fn validate_user_types(types: &[Role]) -> Result<(), ValidationError> {
    if types.is_empty() || types.iter().any(|r| !r.can_compete()) {
        let mut err = ValidationError::new("invalid_user_types");
        err.message = Some("allowedUserTypes must contain only coach and/or athlete".into());
        return Err(err);
    }
    Ok(())
}

fn validate_create_deadline(req: &CreateTournamentRequest) -> Result<(), ValidationError> {
    match req.registration_deadline {
        Some(deadline) if deadline > req.date => {
            let mut err = ValidationError::new("deadline_after_date");
            err.message = Some("Registration deadline must be on or before the tournament date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> serde_json::Value {
        json!({
            "name": "Summer Smash",
            "sport": "Tennis",
            "date": "2030-06-01T09:00:00Z",
            "participants": 16,
            "location": "Pune",
            "prize": "Trophy",
            "organizer": "Pune Tennis Club"
        })
    }

    #[test]
    fn test_minimal_create_is_valid() {
        let req: CreateTournamentRequest = serde_json::from_value(create_body()).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.allowed_user_types.is_none());
    }

    #[test]
    fn test_unknown_sport_fails_to_parse() {
        let mut body = create_body();
        body["sport"] = json!("Chess");
        assert!(serde_json::from_value::<CreateTournamentRequest>(body).is_err());
    }

    #[test]
    fn test_admin_not_an_allowed_user_type() {
        let mut body = create_body();
        body["allowedUserTypes"] = json!(["athlete", "admin"]);
        let req: CreateTournamentRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_deadline_after_event_rejected() {
        let mut body = create_body();
        body["registrationDeadline"] = json!("2030-06-02T00:00:00Z");
        let req: CreateTournamentRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_participants_rejected() {
        let mut body = create_body();
        body["participants"] = json!(0);
        let req: CreateTournamentRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("participants"));
    }
}
