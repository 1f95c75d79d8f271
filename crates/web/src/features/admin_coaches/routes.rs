use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::models::Role;

use super::handlers::{
    get_coach, list_coaches, pending_coaches, reject_coach, search_coaches, stats,
    verify_certificate, verify_coach,
};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_coaches))
        .route("/stats", get(stats))
        .route("/search", get(search_coaches))
        .route("/pending", get(pending_coaches))
        .route("/:id", get(get_coach))
        .route("/:id/verify", put(verify_coach))
        .route("/:id/reject", put(reject_coach))
        .route("/:id/verify-certificate", post(verify_certificate))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Admin),
            require_role,
        ))
}

/// Coach review routes mounted directly under `/api/admin`.
pub fn admin_root_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/pending-coaches", get(pending_coaches))
        .route("/verify/:coach_id", post(verify_certificate))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Admin),
            require_role,
        ))
}
