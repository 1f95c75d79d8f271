use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::models::Role;

use super::handlers::{list_coaches, my_requests, send_request};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_coaches))
        .route("/send-request", post(send_request))
        .route("/my-requests", get(my_requests))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Athlete),
            require_role,
        ))
}
