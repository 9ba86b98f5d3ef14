//! Error types for the gateway layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use staffdesk_database::{AuthError, DirectoryError};

/// HTTP-facing error. Conversions from the domain enums decide the status
/// and the client-visible message; store detail is logged, never returned.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    Unauthorized,

    #[error("User not found")]
    ProfileNotFound,

    #[error("Registration using the reserved administrative email is not allowed")]
    ReservedEmail,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidCredentials
            | GatewayError::Unauthorized
            | GatewayError::ProfileNotFound => StatusCode::UNAUTHORIZED,
            GatewayError::ReservedEmail => StatusCode::FORBIDDEN,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal server error");
        }

        let status = self.status_code();
        let body = json!({
            "error": status.as_str(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<DirectoryError> for GatewayError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::Validation { .. } => GatewayError::InvalidRequest(error.to_string()),
            DirectoryError::ReservedEmail => GatewayError::ReservedEmail,
            DirectoryError::Conflict(field) => GatewayError::Conflict(format!(
                "Cannot create user as the {field} already exists."
            )),
            DirectoryError::NotFound => GatewayError::NotFound("Record not found".to_string()),
            DirectoryError::Database(detail) => GatewayError::Internal(detail),
        }
    }
}

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => GatewayError::InvalidCredentials,
            AuthError::Unauthorized => GatewayError::Unauthorized,
            AuthError::ProfileNotFound => GatewayError::ProfileNotFound,
            AuthError::Database(detail) => GatewayError::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdesk_database::ConflictField;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let error: GatewayError =
            DirectoryError::validation("salary_from", "must be an integer").into();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "invalid salary_from: must be an integer");
    }

    #[test]
    fn auth_failures_map_to_unauthorized_uniformly() {
        let bad_credentials: GatewayError = AuthError::InvalidCredentials.into();
        let bad_token: GatewayError = AuthError::Unauthorized.into();
        let missing_profile: GatewayError = AuthError::ProfileNotFound.into();

        assert_eq!(bad_credentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(bad_token.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing_profile.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn conflicts_name_the_colliding_field() {
        let email: GatewayError = DirectoryError::Conflict(ConflictField::Email).into();
        let phone: GatewayError = DirectoryError::Conflict(ConflictField::Phone).into();

        assert_eq!(email.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            email.to_string(),
            "Cannot create user as the email already exists."
        );
        assert_eq!(
            phone.to_string(),
            "Cannot create user as the phone already exists."
        );
    }

    #[test]
    fn reserved_email_maps_to_forbidden() {
        let error: GatewayError = DirectoryError::ReservedEmail.into();

        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_detail_is_not_echoed_to_clients() {
        let error: GatewayError =
            DirectoryError::Database("connection reset by peer".to_string()).into();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Internal server error");
    }
}
