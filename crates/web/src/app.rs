use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{
    admin_athletes, admin_coaches, admin_profile, athlete_profile, auth, coach_profile,
    coach_requests, find_coaches, tournaments,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Assembles every route group under `/api`, plus Swagger UI.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth::routes::routes(&state))
        .nest("/athlete/profile", athlete_profile::routes::routes(&state))
        .nest("/athlete/find-coaches", find_coaches::routes::routes(&state))
        .nest("/athlete/tournaments", tournaments::routes::athlete_routes(&state))
        .nest("/coach/profile", coach_profile::routes::routes(&state))
        .nest("/coach/requests", coach_requests::routes::routes(&state))
        .nest("/coach/tournaments", tournaments::routes::coach_routes(&state))
        .nest("/admin/profile", admin_profile::routes::routes(&state))
        .nest("/admin/tournaments", tournaments::routes::admin_routes(&state))
        .nest("/admin/athletes", admin_athletes::routes::routes(&state))
        .nest("/admin/coaches", admin_coaches::routes::routes(&state))
        .nest(
            "/admin",
            Router::new()
                .merge(auth::routes::admin_account_routes(&state))
                .merge(admin_coaches::routes::admin_root_routes(&state)),
        );

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
