use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Missing authorization token")]
    MissingToken,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("A user with this email already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid username")]
    InvalidUsername,

    #[error("Refresh token expired or not found")]
    RefreshTokenExpiredOrNotFound,
}

fn log_error(error: &AuthError) {
    match error {
        AuthError::Database(e) => warn!("Auth -> Database query failed: {}", e),
        AuthError::Internal(e) => warn!("Auth -> Internal error: {:?}", e),
        other => warn!("Auth -> {}", other),
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::MissingToken | Self::InvalidToken | Self::RefreshTokenExpiredOrNotFound => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::UserAlreadyExists => (StatusCode::CONFLICT, self.to_string()),
            Self::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::InvalidUsername => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Internal(eyre::eyre!("Password hashing failed: {err}"))
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::UserAlreadyExists,
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}
