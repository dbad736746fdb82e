use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed validation")]
    Validation(Vec<FieldError>),
    #[error("unreadable request body: {0}")]
    Body(String),
    #[error("{0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ValidationResponse {
    errors: Vec<FieldError>,
}

/// Store failure forwarded as-is to the caller
#[derive(Debug, Serialize)]
pub struct StoreErrorBody {
    pub name: &'static str,
    pub message: String,
    pub code: Option<String>,
}

impl From<&sqlx::Error> for StoreErrorBody {
    fn from(err: &sqlx::Error) -> Self {
        let name = match err {
            sqlx::Error::Database(_) => "DatabaseError",
            sqlx::Error::RowNotFound => "RowNotFound",
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => "DecodeError",
            sqlx::Error::Io(_) => "IoError",
            sqlx::Error::PoolTimedOut => "PoolTimedOut",
            sqlx::Error::PoolClosed => "PoolClosed",
            _ => "StoreError",
        };

        let (message, code) = match err {
            sqlx::Error::Database(db_err) => (
                db_err.message().to_string(),
                db_err.code().map(|code| code.into_owned()),
            ),
            other => (other.to_string(), None),
        };

        Self { name, message, code }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
            }
            ApiError::Body(message) => {
                let errors = vec![FieldError::new("body", message)];
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, Json(message)).into_response(),
            ApiError::Store(err) => {
                tracing::error!(error = ?err, "Store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(StoreErrorBody::from(&err))).into_response()
            }
        }
    }
}
