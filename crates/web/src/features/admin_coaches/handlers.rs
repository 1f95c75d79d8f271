use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        admin::{
            CoachDetail, CoachListQuery, CoachSearchQuery, CoachStats, CoachSummary,
            RejectCoachRequest, VerifyCertificateRequest,
        },
        auth::AccountResponse,
        common::{ApiResponse, PaginatedResponse},
    },
    models::{Role, VerificationStatus},
    repository::{
        account::{AccountRepository, VerificationUpdate},
        admin::AdminRepository,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrNotFound, WebError};
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services::{self, SEARCH_LIMIT};

#[utoipa::path(
    get,
    path = "/api/admin/coaches",
    params(CoachListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coaches", body = PaginatedResponse<CoachSummary>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "admin-coaches"
)]
pub async fn list_coaches(
    State(db): State<Database>,
    AppQuery(query): AppQuery<CoachListQuery>,
) -> Result<Response, WebError> {
    let pagination = query.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let (coaches, total) = AdminRepository::new(db.pool())
        .list_coaches(&query, pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(coaches, pagination, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/coaches/stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coach counts by verification state", body = ApiResponse<CoachStats>)
    ),
    tag = "admin-coaches"
)]
pub async fn stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = services::coach_stats(db.pool()).await?;
    Ok(Json(ApiResponse::ok(stats)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/coaches/search",
    params(CoachSearchQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching coaches", body = ApiResponse<Vec<CoachSummary>>)
    ),
    tag = "admin-coaches"
)]
pub async fn search_coaches(
    State(db): State<Database>,
    AppQuery(query): AppQuery<CoachSearchQuery>,
) -> Result<Response, WebError> {
    let coaches = AdminRepository::new(db.pool())
        .search_coaches(&query.q, SEARCH_LIMIT)
        .await?;

    Ok(Json(ApiResponse::ok(coaches)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/coaches/pending",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coaches awaiting verification", body = ApiResponse<Vec<CoachSummary>>)
    ),
    tag = "admin-coaches"
)]
pub async fn pending_coaches(State(db): State<Database>) -> Result<Response, WebError> {
    let coaches = AdminRepository::new(db.pool()).pending_coaches().await?;
    Ok(Json(ApiResponse::ok(coaches)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/coaches/{id}",
    params(("id" = Uuid, Path, description = "Coach account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coach with profile", body = ApiResponse<CoachDetail>),
        (status = 404, description = "Coach not found")
    ),
    tag = "admin-coaches"
)]
pub async fn get_coach(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::coach_detail(db.pool(), id)
        .await
        .or_not_found("Coach not found")?;

    Ok(Json(ApiResponse::ok(detail)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/coaches/{id}/verify",
    params(("id" = Uuid, Path, description = "Coach account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coach verified", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Coach not found")
    ),
    tag = "admin-coaches"
)]
pub async fn verify_coach(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let account = AccountRepository::new(db.pool())
        .set_verification(
            Role::Coach,
            id,
            VerificationStatus::Verified,
            &VerificationUpdate::default(),
        )
        .await
        .or_not_found("Coach not found")?;

    tracing::info!(account_id = %id, "Coach verified");

    Ok(Json(ApiResponse::with_message(
        "Coach verified successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/coaches/{id}/reject",
    params(("id" = Uuid, Path, description = "Coach account id")),
    request_body(content = RejectCoachRequest, description = "Optional rejection reason"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coach rejected", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Coach not found")
    ),
    tag = "admin-coaches"
)]
pub async fn reject_coach(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    body: Option<AppJson<RejectCoachRequest>>,
) -> Result<Response, WebError> {
    let req = body.map(|AppJson(req)| req).unwrap_or_default();
    req.validate()?;

    let update = VerificationUpdate {
        rejection_reason: req.reason.as_deref().map(str::trim).filter(|r| !r.is_empty()),
        ..Default::default()
    };

    let account = AccountRepository::new(db.pool())
        .set_verification(Role::Coach, id, VerificationStatus::Rejected, &update)
        .await
        .or_not_found("Coach not found")?;

    tracing::info!(account_id = %id, "Coach rejected");

    Ok(Json(ApiResponse::with_message(
        "Coach rejected successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/coaches/{id}/verify-certificate",
    params(("id" = Uuid, Path, description = "Coach account id")),
    request_body = VerifyCertificateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Certificate recognised, coach verified", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid sport or certificate"),
        (status = 404, description = "Coach not found")
    ),
    tag = "admin-coaches"
)]
pub async fn verify_certificate(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<VerifyCertificateRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let account = services::verify_with_certificate(db.pool(), id, &req)
        .await
        .or_not_found("Coach not found")?;

    Ok(Json(ApiResponse::with_message(
        "Certificate verified successfully",
        AccountResponse::from(account),
    ))
    .into_response())
}
