use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::models::Role;

use super::handlers::{accepted_athletes, list_requests, update_request};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests))
        .route("/accepted-athletes", get(accepted_athletes))
        .route("/:request_id", put(update_request))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Coach),
            require_role,
        ))
}
