use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::adoption::{RepositoryError, SubmissionError, TransitionError};
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
    Repository(RepositoryError),
    Submission(SubmissionError),
    Transition(TransitionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
            AppError::Transition(err) => write!(f, "status transition error: {}", err),
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
            AppError::Repository(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Transition(err) => Some(err),
        }
    }
}

impl AppError {
    /// HTTP status used when the error reaches a handler boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Repository(err) => repository_status(err),
            AppError::Submission(err) => submission_status(err),
            AppError::Transition(err) => transition_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::BAD_GATEWAY,
    }
}

fn submission_status(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::Incomplete { .. }
        | SubmissionError::InvalidBirthDate(_)
        | SubmissionError::UnmappedValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionError::NotAnApplicant { .. } => StatusCode::FORBIDDEN,
        SubmissionError::PetNotFound(_) => StatusCode::NOT_FOUND,
        SubmissionError::InFlight(_) => StatusCode::CONFLICT,
        SubmissionError::Repository(err) => repository_status(err),
    }
}

fn transition_status(err: &TransitionError) -> StatusCode {
    match err {
        TransitionError::UnsupportedStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TransitionError::Forbidden { .. } => StatusCode::FORBIDDEN,
        TransitionError::NotFound(_) => StatusCode::NOT_FOUND,
        TransitionError::NotPending { .. } | TransitionError::InFlight(_) => StatusCode::CONFLICT,
        TransitionError::Repository(err) => repository_status(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({ "error": self.to_string() });

        // Incomplete drafts also report which step blocks and what it still needs.
        if let AppError::Submission(SubmissionError::Incomplete { step, missing }) = &self {
            body["step"] = json!(step);
            body["missing"] = json!(missing);
        }

        (status, Json(body)).into_response()
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

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<TransitionError> for AppError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}
