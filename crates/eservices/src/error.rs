use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::certificates::{CertificateServiceError, IndexError};
use crate::workflows::eligibility::{ConfigurationError, EligibilityError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Questionnaire(ConfigurationError),
    Eligibility(EligibilityError),
    ResidentIndex(IndexError),
    Certificate(CertificateServiceError),
    ResidentNotFound(String),
}

impl AppError {
    /// Errors caused by what the applicant typed rather than by the deployment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            AppError::Eligibility(_) | AppError::Certificate(CertificateServiceError::Lookup(_))
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Questionnaire(err) => write!(f, "questionnaire integrity error: {}", err),
            AppError::Eligibility(err) => write!(f, "invalid answers: {}", err),
            AppError::ResidentIndex(err) => write!(f, "resident index error: {}", err),
            AppError::Certificate(err) => write!(f, "certificate error: {}", err),
            AppError::ResidentNotFound(id) => write!(f, "no resident certificate for ID {}", id),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Questionnaire(err) => Some(err),
            AppError::Eligibility(err) => Some(err),
            AppError::ResidentIndex(err) => Some(err),
            AppError::Certificate(err) => Some(err),
            AppError::ResidentNotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if matches!(self, AppError::ResidentNotFound(_)) {
            StatusCode::NOT_FOUND
        } else if self.is_user_input() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ConfigurationError> for AppError {
    fn from(value: ConfigurationError) -> Self {
        Self::Questionnaire(value)
    }
}

impl From<EligibilityError> for AppError {
    fn from(value: EligibilityError) -> Self {
        Self::Eligibility(value)
    }
}

impl From<IndexError> for AppError {
    fn from(value: IndexError) -> Self {
        Self::ResidentIndex(value)
    }
}

impl From<CertificateServiceError> for AppError {
    fn from(value: CertificateServiceError) -> Self {
        Self::Certificate(value)
    }
}
