use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        auth::{
            AccountResponse, AdminSignupRequest, AthleteSignupRequest, AuthResponse,
            CoachSignupRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
            UpdateAccountRequest,
        },
        common::{ApiResponse, MessageResponse},
    },
    models::Role,
    repository::account::AccountRepository,
};
use validator::Validate;

use crate::auth::{jwt::TokenService, principal::Principal};
use crate::config::Config;
use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath};
use crate::mailer::Mailer;

use super::services::{self, FORGOT_PASSWORD_MESSAGE, Signup};

async fn current_account(db: &Database, principal: &Principal) -> Result<Response, WebError> {
    let account = AccountRepository::new(db.pool())
        .find_by_id(principal.role, principal.account_id)
        .await
        .or_not_found("Account not found")?;

    Ok(Json(ApiResponse::ok(AccountResponse::from(account))).into_response())
}

async fn forgot(
    db: &Database,
    mailer: &Mailer,
    role: Role,
    req: ForgotPasswordRequest,
) -> Result<Response, WebError> {
    req.validate()?;
    services::forgot_password(db, mailer, role, &req.email).await?;
    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)).into_response())
}

async fn reset(
    db: &Database,
    tokens: &TokenService,
    role: Role,
    token: &str,
    req: ResetPasswordRequest,
) -> Result<Response, WebError> {
    req.validate()?;
    let response = services::reset_password(db, tokens, role, token, &req.password).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/athlete/signup",
    request_body = AthleteSignupRequest,
    responses(
        (status = 201, description = "Athlete registered", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 429, description = "Too many requests")
    ),
    tag = "auth"
)]
pub async fn athlete_signup(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppJson(req): AppJson<AthleteSignupRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::signup(
        &db,
        &tokens,
        Signup {
            role: Role::Athlete,
            name: &req.name,
            email: &req.email,
            password: &req.password,
            sport: Some(&req.sport),
            experience: Some(&req.experience),
            phone: req.phone.as_deref(),
            location: req.location.as_deref(),
            date_of_birth: req.date_of_birth,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/athlete/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn athlete_login(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, WebError> {
    let response = services::login(&db, &tokens, Role::Athlete, &req).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/athlete/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current athlete account", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn athlete_me(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    current_account(&db, &principal).await
}

#[utoipa::path(
    put,
    path = "/api/auth/athlete/me",
    request_body = UpdateAccountRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn update_athlete_me(
    State(db): State<Database>,
    principal: Principal,
    AppJson(req): AppJson<UpdateAccountRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let account = AccountRepository::new(db.pool())
        .update_details(Role::Athlete, principal.account_id, &req)
        .await
        .or_not_found("Account not found")?;

    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/auth/athlete/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn delete_athlete_me(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    AccountRepository::new(db.pool())
        .delete(Role::Athlete, principal.account_id)
        .await
        .or_not_found("Account not found")?;

    tracing::info!(account_id = %principal.account_id, "Athlete deleted own account");
    Ok(Json(MessageResponse::new("Account deleted successfully")).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/athlete/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent when the email is registered", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn athlete_forgot_password(
    State(db): State<Database>,
    State(mailer): State<Mailer>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Response, WebError> {
    forgot(&db, &mailer, Role::Athlete, req).await
}

#[utoipa::path(
    post,
    path = "/api/auth/athlete/reset-password/{token}",
    params(("token" = String, Path, description = "Token from the reset email")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = AuthResponse),
        (status = 400, description = "Invalid or expired reset token")
    ),
    tag = "auth"
)]
pub async fn athlete_reset_password(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppPath(token): AppPath<String>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Response, WebError> {
    reset(&db, &tokens, Role::Athlete, &token, req).await
}

#[utoipa::path(
    post,
    path = "/api/auth/coach/signup",
    request_body = CoachSignupRequest,
    responses(
        (status = 201, description = "Coach registered", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn coach_signup(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppJson(req): AppJson<CoachSignupRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::signup(
        &db,
        &tokens,
        Signup {
            role: Role::Coach,
            name: &req.name,
            email: &req.email,
            password: &req.password,
            sport: Some(&req.sport),
            experience: req.experience.as_deref(),
            phone: req.phone.as_deref(),
            location: req.location.as_deref(),
            date_of_birth: None,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/coach/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Email and password are required"),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Coach not active")
    ),
    tag = "auth"
)]
pub async fn coach_login(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, WebError> {
    let response = services::login(&db, &tokens, Role::Coach, &req).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/coach/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current coach account", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Coach not active")
    ),
    tag = "auth"
)]
pub async fn coach_me(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    current_account(&db, &principal).await
}

#[utoipa::path(
    post,
    path = "/api/auth/coach/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent when the email is registered", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn coach_forgot_password(
    State(db): State<Database>,
    State(mailer): State<Mailer>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Response, WebError> {
    forgot(&db, &mailer, Role::Coach, req).await
}

#[utoipa::path(
    post,
    path = "/api/auth/coach/reset-password/{token}",
    params(("token" = String, Path, description = "Token from the reset email")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = AuthResponse),
        (status = 400, description = "Invalid or expired reset token")
    ),
    tag = "auth"
)]
pub async fn coach_reset_password(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppPath(token): AppPath<String>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Response, WebError> {
    reset(&db, &tokens, Role::Coach, &token, req).await
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/signup",
    request_body = AdminSignupRequest,
    responses(
        (status = 201, description = "Admin registered", body = AuthResponse),
        (status = 403, description = "Admin signup is disabled"),
        (status = 409, description = "Admin already exists")
    ),
    tag = "auth"
)]
pub async fn admin_signup(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    State(config): State<Arc<Config>>,
    AppJson(req): AppJson<AdminSignupRequest>,
) -> Result<Response, WebError> {
    if !config.admin_signup_enabled {
        return Err(WebError::forbidden("Admin signup is disabled"));
    }

    req.validate()?;

    let response = services::signup(
        &db,
        &tokens,
        Signup {
            role: Role::Admin,
            name: &req.name,
            email: &req.email,
            password: &req.password,
            sport: None,
            experience: None,
            phone: None,
            location: None,
            date_of_birth: None,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn admin_login(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, WebError> {
    let response = services::login(&db, &tokens, Role::Admin, &req).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/admin/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current admin account", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn admin_me(
    State(db): State<Database>,
    principal: Principal,
) -> Result<Response, WebError> {
    current_account(&db, &principal).await
}
