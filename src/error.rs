//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("missing table: {0}")]
    MissingTable(&'static str),
    #[error("missing column: {table}.{column}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("schema inspection: {0}")]
    Inspect(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("no data: {0}")]
    NoData(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("data integrity: {0}")]
    Integrity(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("query timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Primary SQLite result codes meaning the file could not be reached: BUSY, LOCKED, IOERR, CANTOPEN.
const UNAVAILABLE_SQLITE_CODES: &[i32] = &[5, 6, 10, 14];

/// Connectivity failures are reported as 503, anything else from the driver as 500.
fn is_unavailable(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| UNAVAILABLE_SQLITE_CODES.contains(&(code & 0xff)))
            .unwrap_or(false),
        _ => false,
    }
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Schema(_) => (StatusCode::INTERNAL_SERVER_ERROR, "schema_error"),
            AppError::NoData(_) => (StatusCode::NOT_FOUND, "no_data"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Integrity(_) => (StatusCode::INTERNAL_SERVER_ERROR, "data_integrity"),
            AppError::Db(e) if is_unavailable(e) => (StatusCode::SERVICE_UNAVAILABLE, "database_unavailable"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Timeout(_) => (StatusCode::SERVICE_UNAVAILABLE, "timeout"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code, "{}", self);
        } else {
            tracing::warn!(code, "{}", self);
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
