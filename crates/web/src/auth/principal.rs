use axum::{extract::FromRequestParts, http::request::Parts};
use storage::models::{AccountStatus, Role};
use uuid::Uuid;

use crate::error::WebError;

/// The authenticated caller, attached to request extensions by
/// [`require_role`](crate::middleware::auth::require_role).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub account_id: Uuid,
    pub role: Role,
    pub status: AccountStatus,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| WebError::unauthorized("No token provided"))
    }
}
