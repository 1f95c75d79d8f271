use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests { retry_after_secs: u64 },
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::TooManyRequests { retry_after_secs } => {
                write!(f, "Too many requests, retry after {}s", retry_after_secs)
            }
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl WebError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalServerError(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Storage(
                StorageError::ConstraintViolation(_)
                | StorageError::Transition(_)
                | StorageError::Registration(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying cause of a server fault, echoed to the client as `error`.
    fn server_cause(&self) -> Option<String> {
        match self {
            Self::Storage(e) if self.status_code().is_server_error() => Some(e.to_string()),
            Self::InternalServerError(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Headline message shown to the client. Server faults get a generic one.
    fn public_message(&self) -> String {
        match self {
            Self::Storage(StorageError::NotFound) => "Resource not found".to_string(),
            Self::Storage(
                e @ (StorageError::Conflict(_)
                | StorageError::Transition(_)
                | StorageError::Registration(_)),
            ) => e.to_string(),
            Self::Storage(StorageError::ConstraintViolation(msg)) => msg.clone(),
            Self::Storage(_) | Self::InternalServerError(_) => {
                "Server error, please try again later".to_string()
            }
            Self::Validation(errors) => field_messages(errors)
                .first()
                .map(|(_, msg)| msg.clone())
                .unwrap_or_else(|| "Validation failed".to_string()),
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::TooManyRequests { .. } => {
                "Too many requests, please try again later".to_string()
            }
        }
    }
}

/// Flattens validator output into `(field, message)` pairs, ordered by field
/// so the headline message is stable.
fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                )
            })
        })
        .collect();
    messages.sort();
    messages
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let message = self.public_message();
        let body = match &self {
            Self::Validation(errors) => {
                let details: Vec<_> = field_messages(errors)
                    .into_iter()
                    .map(|(field, message)| json!({ "field": field, "message": message }))
                    .collect();

                json!({
                    "success": false,
                    "message": message,
                    "errors": details
                })
            }
            _ => match self.server_cause() {
                Some(cause) => json!({
                    "success": false,
                    "message": message,
                    "error": cause
                }),
                None => json!({
                    "success": false,
                    "message": message
                }),
            },
        };

        let mut response = (status_code, Json(body)).into_response();
        if let Self::TooManyRequests { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type WebResult<T> = Result<T, WebError>;

/// Gives a storage `NotFound` a resource-specific message.
pub trait OrNotFound<T> {
    fn or_not_found(self, message: &str) -> WebResult<T>;
}

impl<T> OrNotFound<T> for Result<T, StorageError> {
    fn or_not_found(self, message: &str) -> WebResult<T> {
        self.map_err(|e| match e {
            StorageError::NotFound => WebError::not_found(message),
            other => WebError::Storage(other),
        })
    }
}

impl<T> OrNotFound<T> for WebResult<T> {
    fn or_not_found(self, message: &str) -> WebResult<T> {
        self.map_err(|e| match e {
            WebError::Storage(StorageError::NotFound) => WebError::not_found(message),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::services::registration_policy::RegistrationRejection;
    use validator::Validate;

    async fn body_json(err: WebError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_uses_resource_message() {
        let result: Result<(), StorageError> = Err(StorageError::NotFound);
        let err = result.or_not_found("Tournament not found").unwrap_err();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Tournament not found");
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let err = WebError::from(StorageError::Conflict("Request already pending".into()));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Request already pending");
    }

    #[tokio::test]
    async fn test_registration_rejection_is_bad_request() {
        let err = WebError::from(StorageError::Registration(RegistrationRejection::DeadlinePassed));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Registration deadline has passed");
    }

    #[tokio::test]
    async fn test_database_error_echoes_cause() {
        let err = WebError::from(StorageError::Database(sqlx::Error::PoolTimedOut));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server error, please try again later");
        assert!(body["error"].as_str().unwrap().starts_with("Database error: "));
    }

    #[tokio::test]
    async fn test_internal_error_echoes_cause() {
        let (status, body) = body_json(WebError::internal("mail transport closed")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "mail transport closed");
    }

    #[tokio::test]
    async fn test_client_errors_carry_no_cause() {
        let (_, body) = body_json(WebError::from(StorageError::NotFound)).await;
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let req = storage::dto::auth::LoginRequest {
            email: String::new(),
            password: String::new(),
        };
        let err = WebError::from(req.validate().unwrap_err());

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide email and password");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_too_many_requests_sets_retry_after() {
        let response = WebError::TooManyRequests { retry_after_secs: 12 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[test]
    fn test_or_not_found_rewrites_only_missing_rows() {
        let missing: WebResult<()> = Err(WebError::Storage(StorageError::NotFound));
        assert!(matches!(
            missing.or_not_found("Coach not found"),
            Err(WebError::NotFound(ref m)) if m == "Coach not found"
        ));

        let rejected: WebResult<()> = Err(WebError::bad_request("Invalid sport"));
        assert!(matches!(
            rejected.or_not_found("Coach not found"),
            Err(WebError::BadRequest(_))
        ));
    }
}
