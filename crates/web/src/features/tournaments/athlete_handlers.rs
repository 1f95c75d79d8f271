use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{ApiResponse, MessageResponse, PaginatedResponse},
        tournament::{
            RegisterTournamentRequest, RegistrationWithTournament, TournamentListQuery,
            TournamentWithRegistration,
        },
    },
    models::{Registration, Role},
    repository::registration::RegistrationRepository,
};
use uuid::Uuid;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services::{self, REGISTERED_MESSAGE};

#[utoipa::path(
    get,
    path = "/api/athlete/tournaments",
    params(TournamentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active tournaments open to athletes", body = PaginatedResponse<TournamentWithRegistration>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "athlete-tournaments"
)]
pub async fn list_tournaments(
    State(db): State<Database>,
    principal: Principal,
    AppQuery(query): AppQuery<TournamentListQuery>,
) -> Result<Response, WebError> {
    let pagination = services::checked_pagination(&query)?;
    let filter = services::scoped_filter(&query, Some(Role::Athlete));

    let page =
        services::list_for_participant(db.pool(), principal.account_id, &filter, pagination)
            .await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athlete/tournaments/my-registrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's registrations", body = ApiResponse<Vec<RegistrationWithTournament>>)
    ),
    tag = "athlete-tournaments"
)]
pub async fn my_registrations(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let registrations = services::my_registrations(db.pool(), principal.account_id).await?;
    Ok(Json(ApiResponse::ok(registrations)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athlete/tournaments/{id}",
    params(("id" = Uuid, Path, description = "Tournament id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournament with the caller's registration", body = ApiResponse<TournamentWithRegistration>),
        (status = 404, description = "Tournament not found")
    ),
    tag = "athlete-tournaments"
)]
pub async fn get_tournament(
    State(db): State<Database>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let tournament = services::get_for_participant(db.pool(), principal.account_id, id)
        .await
        .or_not_found("Tournament not found")?;

    Ok(Json(ApiResponse::ok(tournament)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athlete/tournaments/{id}/register",
    params(("id" = Uuid, Path, description = "Tournament id")),
    request_body(content = RegisterTournamentRequest, description = "Optional extra registration details"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Registration pending approval", body = ApiResponse<Registration>),
        (status = 400, description = "Inactive, closed, full or already registered"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "athlete-tournaments"
)]
pub async fn register(
    State(db): State<Database>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
    body: Option<AppJson<RegisterTournamentRequest>>,
) -> Result<Response, WebError> {
    let info = body.and_then(|AppJson(req)| req.additional_info);

    let registration = services::register(db.pool(), id, principal.account_id, Role::Athlete, info)
        .await
        .or_not_found("Tournament not found")?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(REGISTERED_MESSAGE, registration)),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athlete/tournaments/{id}/register",
    params(("id" = Uuid, Path, description = "Tournament id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registration withdrawn", body = MessageResponse),
        (status = 404, description = "No live registration for this tournament")
    ),
    tag = "athlete-tournaments"
)]
pub async fn withdraw(
    State(db): State<Database>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    RegistrationRepository::new(db.pool())
        .withdraw(id, principal.account_id)
        .await
        .or_not_found("Registration not found")?;

    Ok(Json(MessageResponse::new("Registration withdrawn successfully")).into_response())
}
