use chrono::Utc;
use storage::{
    Database,
    dto::auth::{AccountResponse, AuthResponse, LoginRequest, normalize_email},
    models::{Account, Role},
    repository::{
        account::{AccountRepository, NewAccount},
        athlete_profile::AthleteProfileRepository,
        coach_profile::CoachProfileRepository,
    },
};

use crate::auth::{jwt::TokenService, password, reset_token};
use crate::error::{WebError, WebResult};
use crate::mailer::Mailer;

pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If your email is registered, you will receive a password reset link";
pub const INVALID_RESET_TOKEN: &str = "Invalid or expired reset token";

/// Wording that differs between the three login namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthMessages {
    pub already_exists: &'static str,
    pub registered: &'static str,
    pub missing_credentials: &'static str,
    pub bad_credentials: &'static str,
    pub not_active: &'static str,
}

pub fn messages(role: Role) -> AuthMessages {
    match role {
        Role::Athlete => AuthMessages {
            already_exists: "Athlete already exists with this email",
            registered: "Athlete registered successfully",
            missing_credentials: "Please provide email and password",
            bad_credentials: "Invalid email or password",
            not_active: "Athlete not active",
        },
        Role::Coach => AuthMessages {
            already_exists: "Coach already exists with this email",
            registered: "Coach registered successfully",
            missing_credentials: "Email and password are required",
            bad_credentials: "Invalid email or password",
            not_active: "Coach not active",
        },
        Role::Admin => AuthMessages {
            already_exists: "Admin already exists",
            registered: "Admin registered successfully",
            missing_credentials: "Email and password are required",
            bad_credentials: "Invalid credentials",
            not_active: "Admin not active",
        },
    }
}

/// Field values for a new account, before the password is hashed.
pub struct Signup<'a> {
    pub role: Role,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub sport: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

#[tracing::instrument(skip(db, tokens, signup), fields(role = %signup.role))]
pub async fn signup(db: &Database, tokens: &TokenService, signup: Signup<'_>) -> WebResult<AuthResponse> {
    let text = messages(signup.role);
    let email = normalize_email(signup.email);
    let repo = AccountRepository::new(db.pool());

    if repo.find_by_email(signup.role, &email).await?.is_some() {
        return Err(WebError::conflict(text.already_exists));
    }

    let password_hash = password::hash_password_off_thread(signup.password).await?;

    let account = repo
        .create(&NewAccount {
            role: signup.role,
            name: signup.name.trim(),
            email: &email,
            password_hash: &password_hash,
            sport: signup.sport.map(str::trim),
            experience: signup.experience,
            phone: signup.phone,
            location: signup.location,
            date_of_birth: signup.date_of_birth,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                WebError::conflict(text.already_exists)
            } else {
                e.into()
            }
        })?;

    tracing::info!(account_id = %account.account_id, "Account registered");

    let token = tokens.issue(&account)?;
    let has_profile = (signup.role != Role::Admin).then_some(false);

    Ok(AuthResponse {
        success: true,
        message: text.registered.to_string(),
        token,
        user: AccountResponse::from(account),
        has_profile,
    })
}

#[tracing::instrument(skip(db, tokens, credentials))]
pub async fn login(
    db: &Database,
    tokens: &TokenService,
    role: Role,
    credentials: &LoginRequest,
) -> WebResult<AuthResponse> {
    let text = messages(role);

    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(WebError::bad_request(text.missing_credentials));
    }

    let repo = AccountRepository::new(db.pool());
    let account = repo
        .find_by_email(role, &normalize_email(&credentials.email))
        .await?
        .ok_or_else(|| WebError::unauthorized(text.bad_credentials))?;

    let matches =
        password::verify_password_off_thread(&credentials.password, &account.password_hash).await?;
    if !matches {
        tracing::debug!(account_id = %account.account_id, "Password mismatch");
        return Err(WebError::unauthorized(text.bad_credentials));
    }

    if !account.status.is_active() {
        return Err(WebError::forbidden(text.not_active));
    }

    let now = Utc::now();
    repo.touch_last_login(account.account_id, now).await?;

    let has_profile = match role {
        Role::Athlete => Some(
            AthleteProfileRepository::new(db.pool())
                .find_by_account(account.account_id)
                .await?
                .is_some(),
        ),
        Role::Coach => Some(
            CoachProfileRepository::new(db.pool())
                .find_by_account(account.account_id)
                .await?
                .is_some(),
        ),
        Role::Admin => None,
    };

    let token = tokens.issue(&account)?;
    let account = Account {
        last_login: Some(now),
        ..account
    };

    Ok(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: AccountResponse::from(account),
        has_profile,
    })
}

/// Stores a fresh reset token for the account, if any, and mails it.
///
/// The outcome is never revealed to the caller, so a mail failure only
/// discards the token and logs.
#[tracing::instrument(skip(db, mailer, email))]
pub async fn forgot_password(db: &Database, mailer: &Mailer, role: Role, email: &str) -> WebResult<()> {
    let issued = reset_token::issue(Utc::now());
    let repo = AccountRepository::new(db.pool());

    let Some(account) = repo
        .set_reset_token(role, &normalize_email(email), &issued.digest, issued.expires_at)
        .await?
    else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(());
    };

    if let Err(e) = mailer
        .send_password_reset(role, &account.email, &account.name, &issued.token)
        .await
    {
        tracing::error!(account_id = %account.account_id, error = %e, "Password reset email failed");
        repo.clear_reset_token(account.account_id).await?;
    }

    Ok(())
}

#[tracing::instrument(skip(db, tokens, token, new_password))]
pub async fn reset_password(
    db: &Database,
    tokens: &TokenService,
    role: Role,
    token: &str,
    new_password: &str,
) -> WebResult<AuthResponse> {
    let password_hash = password::hash_password_off_thread(new_password).await?;

    let account = AccountRepository::new(db.pool())
        .consume_reset_token(role, &reset_token::digest(token), &password_hash, Utc::now())
        .await?
        .ok_or_else(|| WebError::bad_request(INVALID_RESET_TOKEN))?;

    tracing::info!(account_id = %account.account_id, "Password reset");

    Ok(AuthResponse {
        success: true,
        message: "Password reset successful".to_string(),
        token: tokens.issue(&account)?,
        user: AccountResponse::from(account),
        has_profile: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_differ_per_role() {
        assert_eq!(
            messages(Role::Athlete).already_exists,
            "Athlete already exists with this email"
        );
        assert_eq!(messages(Role::Coach).missing_credentials, "Email and password are required");
        assert_eq!(messages(Role::Admin).bad_credentials, "Invalid credentials");
    }
}
