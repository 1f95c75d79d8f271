use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::auth::jwt::TokenService;
use crate::config::Config;
use crate::mailer::Mailer;
use crate::middleware::rate_limit::RateLimiter;

/// Everything a handler can reach. Cloned per request, so every field is a
/// cheap handle.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub limiter: RateLimiter,
    pub mailer: Mailer,
    pub config: Arc<Config>,
}
