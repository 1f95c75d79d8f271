use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use storage::{models::Role, repository::account::AccountRepository};

use crate::auth::principal::Principal;
use crate::error::WebError;
use crate::state::AppState;

/// Middleware state: the application plus the role a route group demands.
#[derive(Clone)]
pub struct RoleGuard {
    pub state: AppState,
    pub role: Role,
}

impl RoleGuard {
    pub fn new(state: &AppState, role: Role) -> Self {
        Self {
            state: state.clone(),
            role,
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn inactive_message(role: Role) -> &'static str {
    match role {
        Role::Athlete => "Athlete not active",
        Role::Coach => "Coach not active",
        Role::Admin => "Admin not active",
    }
}

/// Authenticates the caller as `guard.role` and attaches a [`Principal`].
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| WebError::unauthorized("No token provided"))?;

    let claims = guard.state.tokens.verify(token, guard.role)?;

    let account = AccountRepository::new(guard.state.db.pool())
        .find_optional(guard.role, claims.sub)
        .await?
        .ok_or_else(|| WebError::unauthorized("Account not found"))?;

    if !account.status.is_active() {
        tracing::warn!(account_id = %account.account_id, status = %account.status.as_str(), "Inactive account rejected");
        return Err(WebError::forbidden(inactive_message(guard.role)));
    }

    req.extensions_mut().insert(Principal {
        account_id: account.account_id,
        role: account.role,
        status: account.status,
        email: account.email,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsed() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_inactive_messages() {
        assert_eq!(inactive_message(Role::Coach), "Coach not active");
    }
}
