use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_REQUEST_MESSAGE: &str = "I would like to train with you!";

/// Lifecycle of a training request: `Pending` resolves exactly once into
/// `Accepted` or `Rejected`, both of which are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Request is already {0}")]
    AlreadyResolved(RequestStatus),

    #[error("Status must be either accepted or rejected")]
    NotAResolution(RequestStatus),
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// Pending and accepted requests both block a new request for the same pair.
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Accepted)
    }

    pub fn resolve(self, target: RequestStatus) -> Result<RequestStatus, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::AlreadyResolved(self));
        }
        if !target.is_terminal() {
            return Err(TransitionError::NotAResolution(target));
        }
        Ok(target)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    pub request_id: Uuid,
    pub athlete_profile_id: Uuid,
    pub coach_profile_id: Uuid,
    pub status: RequestStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_resolves_to_either_terminal_state() {
        assert_eq!(
            RequestStatus::Pending.resolve(RequestStatus::Accepted),
            Ok(RequestStatus::Accepted)
        );
        assert_eq!(
            RequestStatus::Pending.resolve(RequestStatus::Rejected),
            Ok(RequestStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in [RequestStatus::Accepted, RequestStatus::Rejected] {
            for to in [RequestStatus::Pending, RequestStatus::Accepted, RequestStatus::Rejected] {
                assert_eq!(from.resolve(to), Err(TransitionError::AlreadyResolved(from)));
            }
        }
    }

    #[test]
    fn test_pending_to_pending_is_not_a_resolution() {
        assert_eq!(
            RequestStatus::Pending.resolve(RequestStatus::Pending),
            Err(TransitionError::NotAResolution(RequestStatus::Pending))
        );
    }

    #[test]
    fn test_open_statuses_block_new_requests() {
        assert!(RequestStatus::Pending.is_open());
        assert!(RequestStatus::Accepted.is_open());
        assert!(!RequestStatus::Rejected.is_open());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TransitionError::AlreadyResolved(RequestStatus::Rejected).to_string(),
            "Request is already rejected"
        );
    }
}
