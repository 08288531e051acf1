use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::schema::TableName;

#[derive(Debug, ThisError)]
pub enum LensError {
    #[error("missing data source for table {0}")]
    MissingDataSource(TableName),

    #[error("table {table} has no column `{column}`")]
    MissingColumn { table: TableName, column: String },

    #[error("table {table}, row {row}: column `{column}` holds an unreadable value: {reason}")]
    InvalidValue {
        table: TableName,
        column: String,
        row: usize,
        reason: String,
    },

    #[error("degenerate aggregate in {view}: {reason}")]
    DegenerateAggregate { view: &'static str, reason: String },

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for LensError {
    fn from(e: figment::Error) -> Self {
        LensError::Config(Box::new(e))
    }
}

impl LensError {
    pub(crate) fn degenerate(view: &'static str, reason: impl Into<String>) -> Self {
        LensError::DegenerateAggregate {
            view,
            reason: reason.into(),
        }
    }
}

impl IntoResponse for LensError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            LensError::UnknownView(name) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "UNKNOWN_VIEW".to_string(),
                    message: format!("no view named `{name}`"),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
