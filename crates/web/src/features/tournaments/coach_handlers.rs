use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{ApiResponse, PaginatedResponse},
        tournament::{
            CreateTournamentRequest, RegisterTournamentRequest, TournamentListQuery,
            TournamentWithRegistration,
        },
    },
    models::{Registration, Role, Tournament},
    repository::tournament::TournamentRepository,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services::{self, REGISTERED_MESSAGE};

#[utoipa::path(
    get,
    path = "/api/coach/tournaments",
    params(TournamentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active tournaments open to coaches", body = PaginatedResponse<TournamentWithRegistration>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "coach-tournaments"
)]
pub async fn list_tournaments(
    State(db): State<Database>,
    principal: Principal,
    AppQuery(query): AppQuery<TournamentListQuery>,
) -> Result<Response, WebError> {
    let pagination = services::checked_pagination(&query)?;
    let filter = services::scoped_filter(&query, Some(Role::Coach));

    let page =
        services::list_for_participant(db.pool(), principal.account_id, &filter, pagination)
            .await?;

    Ok(Json(page).into_response())
}

/// Coaches organise athlete-only events, so `allowedUserTypes` is ignored.
#[utoipa::path(
    post,
    path = "/api/coach/tournaments",
    request_body = CreateTournamentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Tournament created", body = ApiResponse<Tournament>),
        (status = 400, description = "Validation error")
    ),
    tag = "coach-tournaments"
)]
pub async fn create_tournament(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<CreateTournamentRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let tournament = TournamentRepository::new(db.pool())
        .create(&req, principal.account_id, &[Role::Athlete])
        .await?;

    tracing::info!(tournament_id = %tournament.tournament_id, "Coach created tournament");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Tournament created successfully", tournament)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/coach/tournaments/my-tournaments",
    params(TournamentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournaments created by the caller", body = PaginatedResponse<Tournament>)
    ),
    tag = "coach-tournaments"
)]
pub async fn my_tournaments(
    State(db): State<Database>,
    principal: Principal,
    AppQuery(query): AppQuery<TournamentListQuery>,
) -> Result<Response, WebError> {
    let pagination = services::checked_pagination(&query)?;
    let mut filter = services::scoped_filter(&query, None);
    filter.created_by = Some(principal.account_id);

    let page = services::list_tournaments(db.pool(), &filter, pagination).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    post,
    path = "/api/coach/tournaments/{id}/register",
    params(("id" = Uuid, Path, description = "Tournament id")),
    request_body(content = RegisterTournamentRequest, description = "Optional extra registration details"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Registration pending approval", body = ApiResponse<Registration>),
        (status = 400, description = "Inactive, closed, full or already registered"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "coach-tournaments"
)]
pub async fn register(
    State(db): State<Database>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
    body: Option<AppJson<RegisterTournamentRequest>>,
) -> Result<Response, WebError> {
    let info = body.and_then(|AppJson(req)| req.additional_info);

    let registration = services::register(db.pool(), id, principal.account_id, Role::Coach, info)
        .await
        .or_not_found("Tournament not found")?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(REGISTERED_MESSAGE, registration)),
    )
        .into_response())
}
