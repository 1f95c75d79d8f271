use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{AthleteLevel, RequestStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendCoachRequest {
    /// Coach profile id, as returned by the coach listing
    pub coach_id: Uuid,

    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
}

/// Incoming request as seen by the coach.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestWithAthlete {
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub athlete_profile_id: Uuid,
    pub athlete_name: String,
    pub athlete_email: String,
    pub athlete_sport: Option<String>,
    pub athlete_level: AthleteLevel,
    pub athlete_location: Option<String>,
    pub athlete_profile_image: Option<String>,
}

/// Outgoing request as seen by the athlete.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestWithCoach {
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub coach_profile_id: Uuid,
    pub coach_name: String,
    pub coach_email: String,
    pub coach_sports: Vec<String>,
    pub coach_location: Option<String>,
    pub coach_profile_image: Option<String>,
}
