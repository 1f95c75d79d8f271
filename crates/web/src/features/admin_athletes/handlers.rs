use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        admin::{
            AthleteDetail, AthleteFilterOptions, AthleteListQuery, AthleteStats, AthleteSummary,
            UpdateAccountStatusRequest,
        },
        auth::AccountResponse,
        common::{ApiResponse, MessageResponse, PaginatedResponse},
    },
    models::{Role, VerificationStatus},
    repository::{
        account::{AccountRepository, VerificationUpdate},
        admin::AdminRepository,
    },
};
use uuid::Uuid;

use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/athletes",
    params(AthleteListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athletes, newest first", body = PaginatedResponse<AthleteSummary>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "admin-athletes"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    AppQuery(query): AppQuery<AthleteListQuery>,
) -> Result<Response, WebError> {
    let pagination = query.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let (athletes, total) = AdminRepository::new(db.pool())
        .list_athletes(&query, pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(athletes, pagination, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/athletes/stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athlete counts and breakdowns", body = ApiResponse<AthleteStats>)
    ),
    tag = "admin-athletes"
)]
pub async fn stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = services::athlete_stats(db.pool()).await?;
    Ok(Json(ApiResponse::ok(stats)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/athletes/filters",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Values usable as listing filters", body = ApiResponse<AthleteFilterOptions>)
    ),
    tag = "admin-athletes"
)]
pub async fn filters(State(db): State<Database>) -> Result<Response, WebError> {
    let options = services::filter_options(db.pool()).await?;
    Ok(Json(ApiResponse::ok(options)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/athletes/{id}",
    params(("id" = Uuid, Path, description = "Athlete account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athlete with profile", body = ApiResponse<AthleteDetail>),
        (status = 404, description = "Athlete not found")
    ),
    tag = "admin-athletes"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::athlete_detail(db.pool(), id, Utc::now().date_naive())
        .await
        .or_not_found("Athlete not found")?;

    Ok(Json(ApiResponse::ok(detail)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/athletes/{id}/status",
    params(("id" = Uuid, Path, description = "Athlete account id")),
    request_body = UpdateAccountStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "admin-athletes"
)]
pub async fn update_status(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateAccountStatusRequest>,
) -> Result<Response, WebError> {
    let status = services::assignable_status(&req.status)?;

    let account = AccountRepository::new(db.pool())
        .set_status(Role::Athlete, id, status)
        .await
        .or_not_found("Athlete not found")?;

    tracing::info!(account_id = %id, %status, "Athlete status changed");

    Ok(Json(ApiResponse::with_message(
        format!("Athlete status updated to {status}"),
        AccountResponse::from(account),
    ))
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/athletes/{id}/verify",
    params(("id" = Uuid, Path, description = "Athlete account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athlete verified", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Athlete not found")
    ),
    tag = "admin-athletes"
)]
pub async fn verify_athlete(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let account = AccountRepository::new(db.pool())
        .set_verification(
            Role::Athlete,
            id,
            VerificationStatus::Verified,
            &VerificationUpdate::default(),
        )
        .await
        .or_not_found("Athlete not found")?;

    Ok(Json(ApiResponse::with_message(
        "Athlete verified successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/athletes/{id}",
    params(("id" = Uuid, Path, description = "Athlete account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Athlete deleted", body = MessageResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "admin-athletes"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    AccountRepository::new(db.pool())
        .delete(Role::Athlete, id)
        .await
        .or_not_found("Athlete not found")?;

    tracing::info!(account_id = %id, "Athlete deleted by admin");

    Ok(Json(MessageResponse::new("Athlete deleted successfully")).into_response())
}
