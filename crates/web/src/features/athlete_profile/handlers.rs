use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        athlete_profile::{
            AddAchievementRequest, AthleteProfileResponse, UpdateAthleteProfileRequest,
            UploadImageRequest,
        },
        common::{ApiResponse, MessageResponse},
    },
    models::Achievement,
    repository::athlete_profile::AthleteProfileRepository,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath};

use super::services;

#[utoipa::path(
    get,
    path = "/api/athlete/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athlete profile with achievements", body = ApiResponse<AthleteProfileResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "athlete-profile"
)]
pub async fn get_profile(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let profile = services::ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let response = services::with_achievements(db.pool(), profile).await?;

    Ok(Json(ApiResponse::ok(response)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/athlete/profile",
    request_body = UpdateAthleteProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<AthleteProfileResponse>),
        (status = 400, description = "Name and sport are required fields"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "athlete-profile"
)]
pub async fn update_profile(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<UpdateAthleteProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    services::ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let profile = AthleteProfileRepository::new(db.pool())
        .update(principal.account_id, &req)
        .await
        .or_not_found("Profile not found")?;
    let response = services::with_achievements(db.pool(), profile).await?;

    Ok(Json(ApiResponse::with_message("Profile updated successfully", response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athlete/profile/upload-image",
    request_body = UploadImageRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile image stored", body = ApiResponse<AthleteProfileResponse>),
        (status = 400, description = "A valid imageUrl is required"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "athlete-profile"
)]
pub async fn upload_image(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<UploadImageRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    services::ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let profile = AthleteProfileRepository::new(db.pool())
        .set_image(principal.account_id, req.image_url.trim())
        .await
        .or_not_found("Profile not found")?;
    let response = services::with_achievements(db.pool(), profile).await?;

    Ok(Json(ApiResponse::with_message("Image uploaded successfully", response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athlete/profile/achievements",
    request_body = AddAchievementRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Achievement added", body = ApiResponse<Achievement>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "athlete-profile"
)]
pub async fn add_achievement(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<AddAchievementRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let profile = services::ensure_profile(db.pool(), principal.account_id)
        .await
        .or_not_found("Athlete not found")?;
    let achievement = AthleteProfileRepository::new(db.pool())
        .add_achievement(profile.profile_id, &req)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Achievement added successfully", achievement)),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athlete/profile/achievements/{achievement_id}",
    params(("achievement_id" = Uuid, Path, description = "Achievement id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Achievement deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Achievement not found")
    ),
    tag = "athlete-profile"
)]
pub async fn delete_achievement(
    State(db): State<Database>,
    principal: Principal,
    AppPath(achievement_id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let repo = AthleteProfileRepository::new(db.pool());
    let profile = repo
        .find_by_account(principal.account_id)
        .await?
        .ok_or_else(|| WebError::not_found("Achievement not found"))?;

    repo.delete_achievement(profile.profile_id, achievement_id)
        .await
        .or_not_found("Achievement not found")?;

    Ok(Json(MessageResponse::new("Achievement deleted successfully")).into_response())
}
