use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use storage::models::Role;

use super::handlers::{add_achievement, delete_achievement, get_profile, update_profile, upload_image};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/upload-image", post(upload_image))
        .route("/achievements", post(add_achievement))
        .route("/achievements/:achievement_id", delete(delete_achievement))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Athlete),
            require_role,
        ))
}
