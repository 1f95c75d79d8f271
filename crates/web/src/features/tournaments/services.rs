use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        tournament::{
            RegistrationWithTournament, TournamentFilter, TournamentListQuery,
            TournamentWithRegistration,
        },
    },
    error::Result,
    models::{Registration, Role, Tournament},
    repository::{registration::RegistrationRepository, tournament::TournamentRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub const REGISTERED_MESSAGE: &str =
    "Successfully registered for tournament. Waiting for approval.";

/// Turns listing query parameters into a repository filter scoped for `role`.
///
/// Athletes and coaches only see active tournaments open to their role;
/// admins (`None`) see everything.
pub fn scoped_filter(query: &TournamentListQuery, role: Option<Role>) -> TournamentFilter {
    TournamentFilter {
        search: query.search.clone(),
        status: query.status,
        sport: query.sport,
        allowed_role: role,
        active_only: role.is_some(),
        created_by: None,
    }
}

pub fn checked_pagination(query: &TournamentListQuery) -> WebResult<PaginationParams> {
    let pagination = query.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;
    Ok(pagination)
}

pub async fn list_tournaments(
    pool: &PgPool,
    filter: &TournamentFilter,
    pagination: PaginationParams,
) -> Result<PaginatedResponse<Tournament>> {
    let (tournaments, total) = TournamentRepository::new(pool)
        .list(filter, pagination)
        .await?;
    Ok(PaginatedResponse::new(tournaments, pagination, total))
}

/// A page of tournaments, each paired with `account_id`'s registration.
pub async fn list_for_participant(
    pool: &PgPool,
    account_id: Uuid,
    filter: &TournamentFilter,
    pagination: PaginationParams,
) -> Result<PaginatedResponse<TournamentWithRegistration>> {
    let (tournaments, total) = TournamentRepository::new(pool)
        .list(filter, pagination)
        .await?;

    let ids: Vec<Uuid> = tournaments.iter().map(|t| t.tournament_id).collect();
    let registrations = RegistrationRepository::new(pool)
        .for_account_in(account_id, &ids)
        .await?;

    Ok(PaginatedResponse::new(
        attach_registrations(tournaments, registrations),
        pagination,
        total,
    ))
}

pub fn attach_registrations(
    tournaments: Vec<Tournament>,
    registrations: Vec<Registration>,
) -> Vec<TournamentWithRegistration> {
    let mut by_tournament: HashMap<Uuid, Registration> = registrations
        .into_iter()
        .map(|r| (r.tournament_id, r))
        .collect();

    tournaments
        .into_iter()
        .map(|tournament| TournamentWithRegistration {
            user_registration: by_tournament.remove(&tournament.tournament_id),
            tournament,
        })
        .collect()
}

pub async fn get_for_participant(
    pool: &PgPool,
    account_id: Uuid,
    tournament_id: Uuid,
) -> Result<TournamentWithRegistration> {
    let tournament = TournamentRepository::new(pool).find_by_id(tournament_id).await?;
    let user_registration = RegistrationRepository::new(pool)
        .find_for(tournament_id, account_id)
        .await?;

    Ok(TournamentWithRegistration {
        tournament,
        user_registration,
    })
}

pub async fn my_registrations(pool: &PgPool, account_id: Uuid) -> Result<Vec<RegistrationWithTournament>> {
    let registrations = RegistrationRepository::new(pool)
        .list_for_account(account_id)
        .await?;

    let ids: Vec<Uuid> = registrations.iter().map(|r| r.tournament_id).collect();
    let mut tournaments: HashMap<Uuid, Tournament> = TournamentRepository::new(pool)
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|t| (t.tournament_id, t))
        .collect();

    Ok(registrations
        .into_iter()
        .filter_map(|registration| {
            tournaments
                .remove(&registration.tournament_id)
                .map(|tournament| RegistrationWithTournament {
                    registration,
                    tournament,
                })
        })
        .collect())
}

pub async fn register(
    pool: &PgPool,
    tournament_id: Uuid,
    account_id: Uuid,
    role: Role,
    additional_info: Option<serde_json::Value>,
) -> Result<Registration> {
    let info = additional_info.unwrap_or_else(|| serde_json::json!({}));
    RegistrationRepository::new(pool)
        .register(tournament_id, account_id, role, info, Utc::now())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use storage::models::{RegistrationStatus, Sport, TournamentStatus, Visibility};

    fn tournament() -> Tournament {
        let now = Utc::now();
        Tournament {
            tournament_id: Uuid::new_v4(),
            name: "Spring Cup".into(),
            sport: Sport::Basketball,
            date: now + Duration::days(10),
            participants: 16,
            status: TournamentStatus::Upcoming,
            location: "Pune".into(),
            prize: "Trophy".into(),
            organizer: "City Club".into(),
            description: None,
            registration_deadline: None,
            created_by: None,
            is_active: true,
            visibility: Visibility::Public,
            allowed_user_types: vec![Role::Athlete, Role::Coach],
            max_coaches: 10,
            max_athletes: 100,
            current_coach_count: 0,
            current_athlete_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn registration_for(tournament_id: Uuid) -> Registration {
        Registration {
            registration_id: Uuid::new_v4(),
            tournament_id,
            account_id: Uuid::new_v4(),
            user_type: Role::Athlete,
            status: RegistrationStatus::Pending,
            registration_date: Utc::now(),
            approved_at: None,
            approved_by: None,
            additional_info: serde_json::json!({}),
        }
    }

    #[test]
    fn test_attach_registrations_matches_by_tournament() {
        let a = tournament();
        let b = tournament();
        let reg = registration_for(b.tournament_id);
        let reg_id = reg.registration_id;

        let joined = attach_registrations(vec![a, b], vec![reg]);
        assert!(joined[0].user_registration.is_none());
        assert_eq!(
            joined[1].user_registration.as_ref().map(|r| r.registration_id),
            Some(reg_id)
        );
    }

    #[test]
    fn test_participant_filter_is_scoped() {
        let query = TournamentListQuery {
            search: Some("cup".into()),
            ..Default::default()
        };

        let athlete = scoped_filter(&query, Some(Role::Athlete));
        assert_eq!(athlete.allowed_role, Some(Role::Athlete));
        assert!(athlete.active_only);

        let admin = scoped_filter(&query, None);
        assert_eq!(admin.allowed_role, None);
        assert!(!admin.active_only);
        assert_eq!(admin.search.as_deref(), Some("cup"));
    }

    #[test]
    fn test_pagination_limit_is_checked() {
        let query = TournamentListQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert!(checked_pagination(&query).is_err());
        assert_eq!(checked_pagination(&TournamentListQuery::default()).unwrap().limit, 10);
    }
}
