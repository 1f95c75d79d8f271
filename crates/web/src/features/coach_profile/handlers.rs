use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{coach_profile::UpdateCoachProfileRequest, common::ApiResponse},
    models::CoachProfile,
};
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::AppJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/coach/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coach profile", body = ApiResponse<CoachProfile>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Coach not active")
    ),
    tag = "coach-profile"
)]
pub async fn get_profile(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let profile = services::ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Coach not found")?;

    Ok(Json(ApiResponse::ok(profile)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/coach/profile",
    request_body = UpdateCoachProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<CoachProfile>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "coach-profile"
)]
pub async fn update_profile(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<UpdateCoachProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let profile = services::update_profile(db.pool(), principal.account_id, &req)
        .await
        .or_not_found("Coach not found")?;

    Ok(Json(ApiResponse::with_message("Profile updated successfully", profile)).into_response())
}
