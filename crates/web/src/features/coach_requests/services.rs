use sqlx::PgPool;
use storage::{
    error::Result,
    models::{CoachRequest, RequestStatus},
    repository::coach_request::CoachRequestRepository,
};
use uuid::Uuid;

/// Accepts or rejects a pending request addressed to this coach.
pub async fn resolve_request(
    pool: &PgPool,
    coach_profile_id: Uuid,
    request_id: Uuid,
    target: RequestStatus,
) -> Result<CoachRequest> {
    let request = CoachRequestRepository::new(pool)
        .resolve(request_id, coach_profile_id, target)
        .await?;

    tracing::info!(%request_id, status = %request.status, "Coach request resolved");
    Ok(request)
}

pub fn resolution_message(status: RequestStatus) -> String {
    format!("Request {} successfully", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_message() {
        assert_eq!(
            resolution_message(RequestStatus::Accepted),
            "Request accepted successfully"
        );
        assert_eq!(
            resolution_message(RequestStatus::Rejected),
            "Request rejected successfully"
        );
    }
}
