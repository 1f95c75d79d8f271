use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use sqlx::PgPool;
use storage::Database;
use tower::ServiceExt;
use uuid::Uuid;
use web::{
    app::build_router,
    auth::jwt::TokenService,
    config::{
        Config, EmailConfig, EmailTransportConfig, JwtConfig, RateLimitConfig, RoleTokenConfig,
    },
    mailer::Mailer,
    middleware::rate_limit::RateLimiter,
    state::AppState,
};

fn role_token(secret: &str) -> RoleTokenConfig {
    RoleTokenConfig {
        secret: secret.into(),
        expiry: Duration::from_secs(3600),
    }
}

pub fn app(pool: PgPool) -> Router {
    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        database_max_connections: 1,
        jwt: JwtConfig {
            athlete: role_token("athlete-secret"),
            coach: role_token("coach-secret"),
            admin: role_token("admin-secret"),
        },
        rate_limit: RateLimitConfig {
            max_requests: 1_000,
            window: Duration::from_secs(60),
        },
        cors_origins: Vec::new(),
        admin_signup_enabled: true,
        email: EmailConfig {
            transport: EmailTransportConfig::File {
                path: std::env::temp_dir()
                    .join(format!("scenario-{}", Uuid::new_v4()))
                    .to_string_lossy()
                    .into_owned(),
            },
            from_email: "noreply@example.com".into(),
            from_name: "Test".into(),
            frontend_url: "http://localhost:3000".into(),
        },
    };

    let state = AppState {
        db: Database::from_pool(pool),
        tokens: TokenService::new(config.jwt.clone()),
        limiter: RateLimiter::new(config.rate_limit),
        mailer: Mailer::new(&config.email).unwrap(),
        config: Arc::new(config),
    };

    build_router(state)
}

pub async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Signs up an account of `role` and returns its bearer token.
pub async fn signup(app: &Router, role: &str, email: &str) -> String {
    let body = match role {
        "athlete" => json!({
            "name": "Asha Patil",
            "email": email,
            "password": "secret123",
            "sport": "Tennis",
            "experience": "1-3"
        }),
        "coach" => json!({
            "name": "Ravi Kumar",
            "email": email,
            "password": "secret123",
            "sport": "Tennis",
            "experience": "5-10"
        }),
        _ => json!({ "name": "Root", "email": email, "password": "secret123" }),
    };

    let (status, body) = call(app, "POST", &format!("/api/auth/{role}/signup"), None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}
