//! Signed bearer tokens, one secret and lifetime per role.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use storage::models::{Account, Role};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::WebError;

pub const INVALID_TOKEN: &str = "Not authorized, token failed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct TokenService {
    config: Arc<JwtConfig>,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, WebError> {
        self.issue_at(account.account_id, &account.email, account.role, Utc::now())
    }

    pub fn issue_at(
        &self,
        account_id: Uuid,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, WebError> {
        let settings = self.config.for_role(role);
        let expiry = chrono::Duration::from_std(settings.expiry)
            .map_err(|e| WebError::internal(format!("token expiry out of range: {e}")))?;

        let claims = Claims {
            sub: account_id,
            email: email.to_string(),
            role,
            exp: (now + expiry).timestamp(),
            iat: now.timestamp(),
        };

        let key = EncodingKey::from_secret(settings.secret.as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| WebError::internal(format!("create JWT: {e}")))
    }

    /// Decodes a token that must have been issued for `role`.
    ///
    /// A token signed with another role's secret fails signature validation,
    /// so roles cannot be swapped.
    pub fn verify(&self, token: &str, role: Role) -> Result<Claims, WebError> {
        let settings = self.config.for_role(role);
        let key = DecodingKey::from_secret(settings.secret.as_bytes());

        let data = decode::<Claims>(token, &key, &Validation::default()).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::ExpiredSignature
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::ImmatureSignature
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::InvalidAlgorithm => {
                    tracing::debug!(error = %e, %role, "Rejected bearer token");
                    WebError::unauthorized(INVALID_TOKEN)
                }
                _ => WebError::internal(format!("JWT verification: {e}")),
            }
        })?;

        if data.claims.role != role {
            return Err(WebError::unauthorized(INVALID_TOKEN));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleTokenConfig;
    use std::time::Duration;

    fn config() -> JwtConfig {
        let role = |secret: &str, hours: u64| RoleTokenConfig {
            secret: secret.to_string(),
            expiry: Duration::from_secs(hours * 3600),
        };
        JwtConfig {
            athlete: role("athlete-secret", 720),
            coach: role("coach-secret", 720),
            admin: role("admin-secret", 24),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(config());
        let id = Uuid::new_v4();
        let token = tokens
            .issue_at(id, "a@x.com", Role::Athlete, Utc::now())
            .unwrap();

        let claims = tokens.verify(&token, Role::Athlete).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, Role::Athlete);
        assert_eq!(claims.exp - claims.iat, 720 * 3600);
    }

    #[test]
    fn test_token_for_other_role_is_rejected() {
        let tokens = TokenService::new(config());
        let token = tokens
            .issue_at(Uuid::new_v4(), "c@x.com", Role::Coach, Utc::now())
            .unwrap();

        let err = tokens.verify(&token, Role::Admin).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new(config());
        let issued = Utc::now() - chrono::Duration::hours(25);
        let token = tokens
            .issue_at(Uuid::new_v4(), "d@x.com", Role::Admin, issued)
            .unwrap();

        let err = tokens.verify(&token, Role::Admin).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let tokens = TokenService::new(config());
        let err = tokens.verify("not.a.jwt", Role::Athlete).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized(_)));
    }
}
