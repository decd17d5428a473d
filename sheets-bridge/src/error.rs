use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use model::Snowflake;
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error loading config from environment: {0}")]
    Config(#[from] envy::Error),

    #[error("BOT_TOKEN is empty")]
    MissingToken,

    #[error("invalid sentry DSN: {0}")]
    InvalidDsn(#[from] sentry::types::ParseDsnError),

    #[error("error occurred during I/O operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("error occurred while talking to Discord: {0}")]
    Gateway(#[from] gateway::GatewayError),

    #[error("error occurred while sending callback: {0}")]
    Callback(#[from] reqwest::Error),

    #[error("interaction {0} has no invoking user")]
    MissingInvoker(Snowflake),
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

/// Failures surfaced to callers of `POST /webhook`.
#[derive(thiserror::Error, Debug)]
pub enum WebhookError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Channel not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] Error),
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebhookError::NotFound => StatusCode::NOT_FOUND,
            WebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<gateway::GatewayError> for WebhookError {
    fn from(e: gateway::GatewayError) -> Self {
        WebhookError::Internal(Error::Gateway(e))
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        if let WebhookError::Internal(e) = &self {
            error!(error = %e, "Error while handling webhook");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
