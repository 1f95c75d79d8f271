use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use storage::Database;
use web::{
    app::build_router,
    auth::jwt::TokenService,
    config::Config,
    mailer::Mailer,
    middleware::rate_limit::RateLimiter,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting PlayBit API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let mailer = Mailer::new(&config.email).context("Failed to configure mail transport")?;
    let limiter = RateLimiter::new(config.rate_limit);
    let _pruner = limiter.spawn_pruner(config.rate_limit.window);

    if config.admin_signup_enabled {
        tracing::warn!("Public admin signup is enabled");
    }

    let bind_address = format!("{}:{}", config.host, config.port);

    let state = AppState {
        db,
        tokens: TokenService::new(config.jwt.clone()),
        limiter,
        mailer,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
