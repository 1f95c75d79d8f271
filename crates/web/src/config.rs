use std::time::Duration;

use anyhow::{Context, Result};
use storage::models::Role;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors_origins: Vec<String>,
    pub admin_signup_enabled: bool,
    pub email: EmailConfig,
}

/// Signing secret and token lifetime for one role.
#[derive(Debug, Clone)]
pub struct RoleTokenConfig {
    pub secret: String,
    pub expiry: Duration,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub athlete: RoleTokenConfig,
    pub coach: RoleTokenConfig,
    pub admin: RoleTokenConfig,
}

impl JwtConfig {
    pub fn for_role(&self, role: Role) -> &RoleTokenConfig {
        match role {
            Role::Athlete => &self.athlete,
            Role::Coach => &self.coach,
            Role::Admin => &self.admin,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EmailTransportConfig {
    Smtp {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
    /// Writes messages to a directory instead of sending them.
    File { path: String },
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub transport: EmailTransportConfig,
    pub from_email: String,
    pub from_name: String,
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000)?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10)?,
            jwt: JwtConfig {
                athlete: role_token("ATHLETE", 24 * 30)?,
                coach: role_token("COACH", 24 * 30)?,
                admin: role_token("ADMIN", 24)?,
            },
            rate_limit: RateLimitConfig {
                max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS", 20)?,
                window: Duration::from_secs(env_parse::<u64>("RATE_LIMIT_WINDOW_SECS", 60)?.max(1)),
            },
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173,http://localhost:3000")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            admin_signup_enabled: env_parse("ADMIN_SIGNUP_ENABLED", false)?,
            email: EmailConfig {
                transport: email_transport()?,
                from_email: env_or("EMAIL_FROM", "noreply@playbit.local"),
                from_name: env_or("EMAIL_FROM_NAME", "PlayBit Sports"),
                frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn role_token(role: &str, default_hours: u64) -> Result<RoleTokenConfig> {
    let secret_key = format!("JWT_{role}_SECRET");
    let secret = std::env::var(&secret_key)
        .with_context(|| format!("Cannot load {secret_key} env variable"))?;
    anyhow::ensure!(!secret.trim().is_empty(), "{secret_key} must not be empty");

    let hours: u64 = env_parse(&format!("JWT_{role}_EXPIRY_HOURS"), default_hours)?;

    Ok(RoleTokenConfig {
        secret,
        expiry: Duration::from_secs(hours * 3600),
    })
}

fn email_transport() -> Result<EmailTransportConfig> {
    match std::env::var("SMTP_HOST") {
        Ok(host) if !host.trim().is_empty() => Ok(EmailTransportConfig::Smtp {
            host,
            port: env_parse("SMTP_PORT", 587)?,
            username: std::env::var("SMTP_USERNAME")
                .context("SMTP_USERNAME is required when SMTP_HOST is set")?,
            password: std::env::var("SMTP_PASSWORD")
                .context("SMTP_PASSWORD is required when SMTP_HOST is set")?,
        }),
        _ => Ok(EmailTransportConfig::File {
            path: env_or("EMAIL_DROP_DIR", "./emails"),
        }),
    }
}
