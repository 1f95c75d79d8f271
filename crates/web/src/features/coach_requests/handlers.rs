use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        coach_request::{RequestListQuery, RequestWithAthlete, UpdateRequestStatus},
        common::ApiResponse,
    },
    models::{AthleteProfile, CoachRequest},
    repository::coach_request::CoachRequestRepository,
};
use uuid::Uuid;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::features::coach_profile::services::ensure_profile;

use super::services;

#[utoipa::path(
    get,
    path = "/api/coach/requests",
    params(RequestListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Incoming requests, newest first", body = ApiResponse<Vec<RequestWithAthlete>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "coach-requests"
)]
pub async fn list_requests(
    State(db): State<Database>,
    principal: Principal,
    AppQuery(query): AppQuery<RequestListQuery>,
) -> Result<Response, WebError> {
    let coach = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Coach not found")?;
    let requests = CoachRequestRepository::new(db.pool())
        .list_for_coach(coach.profile_id, query.status)
        .await?;

    Ok(Json(ApiResponse::ok(requests)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/coach/requests/{request_id}",
    params(("request_id" = Uuid, Path, description = "Request id")),
    request_body = UpdateRequestStatus,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request resolved", body = ApiResponse<CoachRequest>),
        (status = 400, description = "Request is not pending or status is not a resolution"),
        (status = 404, description = "Request not found")
    ),
    tag = "coach-requests"
)]
pub async fn update_request(
    State(db): State<Database>,
    principal: Principal,
    AppPath(request_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateRequestStatus>,
) -> Result<Response, WebError> {
    let coach = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Coach not found")?;
    let request = services::resolve_request(db.pool(), coach.profile_id, request_id, req.status)
        .await
        .or_not_found("Request not found")?;

    Ok(Json(ApiResponse::with_message(
        services::resolution_message(request.status),
        request,
    ))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/coach/requests/accepted-athletes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profiles of athletes whose requests were accepted", body = ApiResponse<Vec<AthleteProfile>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "coach-requests"
)]
pub async fn accepted_athletes(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let coach = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Coach not found")?;
    let athletes = CoachRequestRepository::new(db.pool())
        .accepted_athletes(coach.profile_id)
        .await?;

    Ok(Json(ApiResponse::ok(athletes)).into_response())
}
