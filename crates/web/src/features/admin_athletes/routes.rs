use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::models::Role;

use super::handlers::{
    delete_athlete, filters, get_athlete, list_athletes, stats, update_status, verify_athlete,
};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_athletes))
        .route("/stats", get(stats))
        .route("/filters", get(filters))
        .route("/filters/options", get(filters))
        .route("/:id", get(get_athlete).delete(delete_athlete))
        .route("/:id/status", put(update_status))
        .route("/:id/verify", put(verify_athlete))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Admin),
            require_role,
        ))
}
