use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        coach_profile::{CoachDiscoveryFilter, CoachListing},
        coach_request::{RequestWithCoach, SendCoachRequest},
        common::ApiResponse,
    },
    models::CoachRequest,
    repository::coach_request::CoachRequestRepository,
};
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppQuery};
use crate::features::athlete_profile::services::ensure_profile;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athlete/find-coaches",
    params(CoachDiscoveryFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active coaches with the caller's request status", body = ApiResponse<Vec<CoachListing>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "find-coaches"
)]
pub async fn list_coaches(
    State(db): State<Database>,
    principal: Principal,
    AppQuery(filter): AppQuery<CoachDiscoveryFilter>,
) -> Result<Response, WebError> {
    let athlete = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let coaches = services::list_coaches(db.pool(), athlete.profile_id, &filter).await?;

    Ok(Json(ApiResponse::ok(coaches)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athlete/find-coaches/send-request",
    request_body = SendCoachRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Request sent", body = ApiResponse<CoachRequest>),
        (status = 404, description = "Coach not found"),
        (status = 409, description = "Request already pending or accepted")
    ),
    tag = "find-coaches"
)]
pub async fn send_request(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<SendCoachRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let request = services::send_request(
        db.pool(),
        athlete.profile_id,
        req.coach_id,
        req.message.as_deref(),
    )
    .await
    .or_not_found("Coach not found")?;

    tracing::info!(request_id = %request.request_id, "Coach request sent");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Request sent successfully", request)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/athlete/find-coaches/my-requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's requests, newest first", body = ApiResponse<Vec<RequestWithCoach>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "find-coaches"
)]
pub async fn my_requests(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let athlete = ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let requests = CoachRequestRepository::new(db.pool())
        .list_for_athlete(athlete.profile_id)
        .await?;

    Ok(Json(ApiResponse::ok(requests)).into_response())
}
