use crate::config::ConfigError;
use crate::interactions::dataset::DatasetImportError;
use crate::interactions::{CheckError, ReferenceDataError};
use crate::telemetry::TelemetryError;
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
    Check(CheckError),
    ReferenceData(ReferenceDataError),
    Dataset(DatasetImportError),
    InvalidPayload(String),
    Unauthorized,
    DrugNotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Check(err) => write!(f, "{}", err),
            AppError::ReferenceData(err) => write!(f, "reference data error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset import error: {}", err),
            AppError::InvalidPayload(message) => write!(f, "{}", message),
            AppError::Unauthorized => write!(f, "Invalid or missing API key"),
            AppError::DrugNotFound(_) => write!(f, "Drug not found in database"),
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
            AppError::Check(err) => Some(err),
            AppError::ReferenceData(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::InvalidPayload(_) | AppError::Unauthorized | AppError::DrugNotFound(_) => {
                None
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Check(_) | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::DrugNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::ReferenceData(_)
            | AppError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
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

impl From<CheckError> for AppError {
    fn from(value: CheckError) -> Self {
        Self::Check(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::ReferenceData(value)
    }
}

impl From<DatasetImportError> for AppError {
    fn from(value: DatasetImportError) -> Self {
        Self::Dataset(value)
    }
}
