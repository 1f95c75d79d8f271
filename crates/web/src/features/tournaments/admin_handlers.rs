use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        common::{ApiResponse, MessageResponse, PaginatedResponse},
        tournament::{
            CreateTournamentRequest, RegistrationWithAccount, TournamentListQuery,
            TournamentStats, UpdateRegistrationStatus, UpdateTournamentRequest,
        },
    },
    models::{Registration, Role, Tournament},
    repository::{registration::RegistrationRepository, tournament::TournamentRepository},
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services;

const DEFAULT_ALLOWED: [Role; 2] = [Role::Coach, Role::Athlete];

#[utoipa::path(
    get,
    path = "/api/admin/tournaments",
    params(TournamentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tournaments", body = PaginatedResponse<Tournament>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "admin-tournaments"
)]
pub async fn list_tournaments(
    State(db): State<Database>,
    AppQuery(query): AppQuery<TournamentListQuery>,
) -> Result<Response, WebError> {
    let pagination = services::checked_pagination(&query)?;
    let filter = services::scoped_filter(&query, None);

    let page = services::list_tournaments(db.pool(), &filter, pagination).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/tournaments",
    request_body = CreateTournamentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Tournament created", body = ApiResponse<Tournament>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-tournaments"
)]
pub async fn create_tournament(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<CreateTournamentRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let allowed = req.allowed_user_types.clone().unwrap_or_else(|| DEFAULT_ALLOWED.to_vec());
    let tournament = TournamentRepository::new(db.pool())
        .create(&req, principal.account_id, &allowed)
        .await?;

    tracing::info!(tournament_id = %tournament.tournament_id, "Admin created tournament");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Tournament created successfully", tournament)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/tournaments/stats/overview",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournament counts by state", body = ApiResponse<TournamentStats>)
    ),
    tag = "admin-tournaments"
)]
pub async fn stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = TournamentRepository::new(db.pool()).stats().await?;
    Ok(Json(ApiResponse::ok(stats)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/tournaments/{id}",
    params(("id" = Uuid, Path, description = "Tournament id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournament", body = ApiResponse<Tournament>),
        (status = 404, description = "Tournament not found")
    ),
    tag = "admin-tournaments"
)]
pub async fn get_tournament(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let tournament = TournamentRepository::new(db.pool())
        .find_by_id(id)
        .await
        .or_not_found("Tournament not found")?;

    Ok(Json(ApiResponse::ok(tournament)).into_response())
}

/// Partial update. Lowering a maximum below the slots already held is rejected.
#[utoipa::path(
    put,
    path = "/api/admin/tournaments/{id}",
    params(("id" = Uuid, Path, description = "Tournament id")),
    request_body = UpdateTournamentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournament updated", body = ApiResponse<Tournament>),
        (status = 400, description = "Validation error or capacity below current count"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "admin-tournaments"
)]
pub async fn update_tournament(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateTournamentRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let tournament = TournamentRepository::new(db.pool())
        .update(id, &req)
        .await
        .or_not_found("Tournament not found")?;

    Ok(Json(ApiResponse::with_message("Tournament updated successfully", tournament)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/tournaments/{id}",
    params(("id" = Uuid, Path, description = "Tournament id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tournament deleted", body = MessageResponse),
        (status = 404, description = "Tournament not found")
    ),
    tag = "admin-tournaments"
)]
pub async fn delete_tournament(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    TournamentRepository::new(db.pool())
        .delete(id)
        .await
        .or_not_found("Tournament not found")?;

    tracing::info!(tournament_id = %id, "Tournament deleted");

    Ok(Json(MessageResponse::new("Tournament deleted successfully")).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/tournaments/{id}/registrations",
    params(("id" = Uuid, Path, description = "Tournament id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registrations with registrant details", body = ApiResponse<Vec<RegistrationWithAccount>>),
        (status = 404, description = "Tournament not found")
    ),
    tag = "admin-tournaments"
)]
pub async fn tournament_registrations(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    TournamentRepository::new(db.pool())
        .find_by_id(id)
        .await
        .or_not_found("Tournament not found")?;

    let registrations = RegistrationRepository::new(db.pool())
        .list_for_tournament(id)
        .await?;

    Ok(Json(ApiResponse::ok(registrations)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/tournaments/registrations/{registration_id}",
    params(("registration_id" = Uuid, Path, description = "Registration id")),
    request_body = UpdateRegistrationStatus,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registration reviewed", body = ApiResponse<Registration>),
        (status = 400, description = "Status change not allowed"),
        (status = 404, description = "Registration not found")
    ),
    tag = "admin-tournaments"
)]
pub async fn review_registration(
    State(db): State<Database>,
    principal: Principal,
    AppPath(registration_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateRegistrationStatus>,
) -> Result<Response, WebError> {
    let registration = RegistrationRepository::new(db.pool())
        .review(registration_id, req.status, principal.account_id, Utc::now())
        .await
        .or_not_found("Registration not found")?;

    let message = format!("Registration {} successfully", registration.status);
    Ok(Json(ApiResponse::with_message(message, registration)).into_response())
}
