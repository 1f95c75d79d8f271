use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
            RegistrationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Whether a registration in this status occupies one of the tournament's slots.
    pub fn holds_slot(&self) -> bool {
        matches!(self, RegistrationStatus::Pending | RegistrationStatus::Approved)
    }

    /// Approved, rejected and withdrawn registrations never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RegistrationStatus::Pending)
    }

    /// Admin review only decides pending registrations.
    pub fn can_review_to(&self, target: RegistrationStatus) -> bool {
        !self.is_terminal()
            && matches!(target, RegistrationStatus::Approved | RegistrationStatus::Rejected)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_statuses_hold_slots() {
        assert!(RegistrationStatus::Pending.holds_slot());
        assert!(RegistrationStatus::Approved.holds_slot());
        assert!(!RegistrationStatus::Rejected.holds_slot());
        assert!(!RegistrationStatus::Withdrawn.holds_slot());
    }

    #[test]
    fn test_review_transitions() {
        use RegistrationStatus::*;
        assert!(Pending.can_review_to(Approved));
        assert!(Pending.can_review_to(Rejected));
        assert!(!Approved.can_review_to(Rejected));
        assert!(!Rejected.can_review_to(Approved));
        assert!(!Withdrawn.can_review_to(Approved));
        assert!(!Pending.can_review_to(Withdrawn));
        assert!(!Approved.can_review_to(Approved));
    }

    #[test]
    fn test_only_pending_is_open() {
        assert!(!RegistrationStatus::Pending.is_terminal());
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
        assert!(RegistrationStatus::Withdrawn.is_terminal());
    }
}
