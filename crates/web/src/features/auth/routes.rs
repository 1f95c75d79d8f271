use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::models::Role;

use super::handlers::{
    admin_login, admin_me, admin_signup, athlete_forgot_password, athlete_login, athlete_me,
    athlete_reset_password, athlete_signup, coach_forgot_password, coach_login, coach_me, coach_signup,
    coach_reset_password, delete_athlete_me, update_athlete_me,
};
use crate::middleware::{
    auth::{RoleGuard, require_role},
    rate_limit::rate_limit,
};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let athlete_me_routes = Router::new()
        .route(
            "/athlete/me",
            get(athlete_me).put(update_athlete_me).delete(delete_athlete_me),
        )
        .route(
            "/athlete/profile",
            get(athlete_me).put(update_athlete_me).delete(delete_athlete_me),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Athlete),
            require_role,
        ));

    let coach_me_routes = Router::new()
        .route("/coach/me", get(coach_me))
        .route("/coach/profile", get(coach_me))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Coach),
            require_role,
        ));

    let admin_me_routes = Router::new()
        .route("/admin/me", get(admin_me))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Admin),
            require_role,
        ));

    Router::new()
        .route("/athlete/signup", post(athlete_signup))
        .route("/athlete/register", post(athlete_signup))
        .route("/athlete/login", post(athlete_login))
        .route("/athlete/forgot-password", post(athlete_forgot_password))
        .route("/athlete/reset-password/:token", post(athlete_reset_password))
        .route("/coach/signup", post(coach_signup))
        .route("/coach/register", post(coach_signup))
        .route("/coach/login", post(coach_login))
        .route("/coach/forgot-password", post(coach_forgot_password))
        .route("/coach/reset-password/:token", post(coach_reset_password))
        .route("/admin/signup", post(admin_signup))
        .route("/admin/login", post(admin_login))
        .merge(athlete_me_routes)
        .merge(coach_me_routes)
        .merge(admin_me_routes)
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit,
        ))
}

/// Admin signup and login as mounted directly under `/api/admin`.
pub fn admin_account_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", post(admin_signup))
        .route("/login", post(admin_login))
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit,
        ))
}
