//! Eligibility rules for joining a tournament.
//!
//! The checks run in a fixed order so callers always see the first rule a
//! registration breaks: tournament state, role, deadline, duplicates and
//! finally capacity. The capacity check here is advisory; the repository
//! re-checks it with a conditional increment when the slot is taken.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{RegistrationStatus, Role, Tournament};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationRejection {
    #[error("This tournament is no longer accepting registrations")]
    Inactive,

    #[error("This tournament is not available for {0} registration")]
    RoleNotAllowed(Role),

    #[error("Registration deadline has passed")]
    DeadlinePassed,

    #[error("You are already registered for this tournament (Status: {0})")]
    AlreadyRegistered(RegistrationStatus),

    #[error("No more {0} slots available for this tournament")]
    NoSlots(Role),
}

/// Validates a registration attempt against a tournament snapshot.
///
/// `existing` is the status of the caller's registration row, if any. Every
/// existing row blocks, withdrawn ones included.
pub fn check_eligibility(
    tournament: &Tournament,
    role: Role,
    existing: Option<RegistrationStatus>,
    now: DateTime<Utc>,
) -> Result<(), RegistrationRejection> {
    if !tournament.is_active {
        return Err(RegistrationRejection::Inactive);
    }

    if !role.can_compete() || !tournament.allows(role) {
        return Err(RegistrationRejection::RoleNotAllowed(role));
    }

    if let Some(deadline) = tournament.registration_deadline {
        if now >= deadline {
            return Err(RegistrationRejection::DeadlinePassed);
        }
    }

    if let Some(status) = existing {
        return Err(RegistrationRejection::AlreadyRegistered(status));
    }

    if !tournament.has_slot_for(role) {
        return Err(RegistrationRejection::NoSlots(role));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sport, TournamentStatus, Visibility};
    use chrono::Duration;
    use uuid::Uuid;

    fn tournament() -> Tournament {
        let now = Utc::now();
        Tournament {
            tournament_id: Uuid::new_v4(),
            name: "City Open".into(),
            sport: Sport::Tennis,
            date: now + Duration::days(30),
            participants: 32,
            status: TournamentStatus::Upcoming,
            location: "Pune".into(),
            prize: "10000".into(),
            organizer: "City Club".into(),
            description: None,
            registration_deadline: Some(now + Duration::days(7)),
            created_by: None,
            is_active: true,
            visibility: Visibility::Public,
            allowed_user_types: vec![Role::Athlete, Role::Coach],
            max_coaches: 10,
            max_athletes: 1,
            current_coach_count: 0,
            current_athlete_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_open_tournament_accepts_athlete() {
        assert_eq!(check_eligibility(&tournament(), Role::Athlete, None, Utc::now()), Ok(()));
    }

    #[test]
    fn test_inactive_tournament_rejected_first() {
        let mut t = tournament();
        t.is_active = false;
        t.current_athlete_count = 1;
        assert_eq!(
            check_eligibility(&t, Role::Athlete, None, Utc::now()),
            Err(RegistrationRejection::Inactive)
        );
    }

    #[test]
    fn test_role_must_be_allowed() {
        let mut t = tournament();
        t.allowed_user_types = vec![Role::Athlete];
        let err = check_eligibility(&t, Role::Coach, None, Utc::now()).unwrap_err();
        assert_eq!(err, RegistrationRejection::RoleNotAllowed(Role::Coach));
        assert_eq!(
            err.to_string(),
            "This tournament is not available for coach registration"
        );
    }

    #[test]
    fn test_admins_never_register() {
        let mut t = tournament();
        t.allowed_user_types = vec![Role::Admin, Role::Athlete];
        assert_eq!(
            check_eligibility(&t, Role::Admin, None, Utc::now()),
            Err(RegistrationRejection::RoleNotAllowed(Role::Admin))
        );
    }

    #[test]
    fn test_deadline_is_exclusive() {
        let t = tournament();
        let deadline = t.registration_deadline.unwrap();
        assert_eq!(
            check_eligibility(&t, Role::Athlete, None, deadline),
            Err(RegistrationRejection::DeadlinePassed)
        );
        assert!(check_eligibility(&t, Role::Athlete, None, deadline - Duration::seconds(1)).is_ok());
    }

    #[test]
    fn test_no_deadline_means_always_open() {
        let mut t = tournament();
        t.registration_deadline = None;
        let far_future = Utc::now() + Duration::days(3650);
        assert!(check_eligibility(&t, Role::Athlete, None, far_future).is_ok());
    }

    #[test]
    fn test_existing_registration_blocks() {
        let err = check_eligibility(
            &tournament(),
            Role::Athlete,
            Some(RegistrationStatus::Rejected),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You are already registered for this tournament (Status: rejected)"
        );
    }

    #[test]
    fn test_withdrawn_registration_is_final() {
        assert_eq!(
            check_eligibility(
                &tournament(),
                Role::Athlete,
                Some(RegistrationStatus::Withdrawn),
                Utc::now()
            ),
            Err(RegistrationRejection::AlreadyRegistered(RegistrationStatus::Withdrawn))
        );
    }

    #[test]
    fn test_full_tournament_reports_role_slots() {
        let mut t = tournament();
        t.current_athlete_count = t.max_athletes;
        let err = check_eligibility(&t, Role::Athlete, None, Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "No more athlete slots available for this tournament");

        // coach capacity is tracked separately
        assert!(check_eligibility(&t, Role::Coach, None, Utc::now()).is_ok());
    }

    #[test]
    fn test_duplicate_reported_before_capacity() {
        let mut t = tournament();
        t.current_athlete_count = t.max_athletes;
        assert_eq!(
            check_eligibility(&t, Role::Athlete, Some(RegistrationStatus::Pending), Utc::now()),
            Err(RegistrationRejection::AlreadyRegistered(RegistrationStatus::Pending))
        );
    }
}
