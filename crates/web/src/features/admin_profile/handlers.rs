use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        auth::{AccountResponse, UpdateAdminProfileRequest},
        common::ApiResponse,
    },
};
use validator::Validate;

use crate::auth::principal::Principal;
use crate::error::{OrNotFound, WebError};
use crate::extract::AppJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin profile", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin-profile"
)]
pub async fn get_profile(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    let account = services::get_admin(db.pool(), &principal)
        .await
        .or_not_found("Admin not found")?;

    Ok(Json(ApiResponse::ok(AccountResponse::from(account))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/profile",
    request_body = UpdateAdminProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin-profile"
)]
pub async fn update_profile(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<UpdateAdminProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let account = services::rename_admin(db.pool(), &principal, req.name.trim())
        .await
        .or_not_found("Admin not found")?;

    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}
