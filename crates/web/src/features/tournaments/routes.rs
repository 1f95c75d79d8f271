use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::models::Role;

use super::{admin_handlers, athlete_handlers, coach_handlers};
use crate::middleware::auth::{RoleGuard, require_role};
use crate::state::AppState;

pub fn athlete_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(athlete_handlers::list_tournaments))
        .route("/my-registrations", get(athlete_handlers::my_registrations))
        .route("/:id", get(athlete_handlers::get_tournament))
        .route(
            "/:id/register",
            post(athlete_handlers::register).delete(athlete_handlers::withdraw),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Athlete),
            require_role,
        ))
}

pub fn coach_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(coach_handlers::list_tournaments).post(coach_handlers::create_tournament),
        )
        .route("/my-tournaments", get(coach_handlers::my_tournaments))
        .route("/:id/register", post(coach_handlers::register))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Coach),
            require_role,
        ))
}

pub fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin_handlers::list_tournaments).post(admin_handlers::create_tournament),
        )
        .route("/stats/overview", get(admin_handlers::stats))
        .route(
            "/registrations/:registration_id",
            put(admin_handlers::review_registration),
        )
        .route(
            "/:id",
            get(admin_handlers::get_tournament)
                .put(admin_handlers::update_tournament)
                .delete(admin_handlers::delete_tournament),
        )
        .route(
            "/:id/registrations",
            get(admin_handlers::tournament_registrations),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state, Role::Admin),
            require_role,
        ))
}
