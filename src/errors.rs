// Erreurs de l'API, toutes rendues au format {code, message, timestamp}

use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::utils::datetime;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", describe_validation(.0))]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    // Le détail SQL reste dans les logs
    #[error("Internal server error")]
    Database(DbErr),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Corps JSON commun aux erreurs et aux confirmations (suppression, check-token)
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub code: u16,
    pub message: String,
    pub timestamp: String,
}

impl StatusBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            timestamp: datetime::timestamp(),
        }
    }
}

impl ApiError {
    pub fn resource_not_found(path: &str) -> Self {
        ApiError::NotFound(format!("The resource \"{}\" does not exist.", path))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ApiError::Conflict(format!(
                "A resource with the same unique value already exists ({})",
                detail
            )),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => ApiError::Conflict(format!(
                "The resource is still referenced by other records ({})",
                detail
            )),
            _ => match err {
                DbErr::RecordNotFound(msg) => ApiError::NotFound(msg),
                other => ApiError::Database(other),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ApiError::Database(db_err) => error!("Database error: {}", db_err),
            _ if status.is_server_error() => error!("Request failed: {}", self),
            _ => {}
        }

        HttpResponse::build(status).json(StatusBody::new(status, self.to_string()))
    }
}

fn describe_validation(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

/// Corps JSON illisible ou Content-Type manquant -> 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("Invalid data: {}", err)).into()
}

/// Paramètre de chemin invalide (ex: /api/tasks/abc) -> la ressource n'existe pas
pub fn path_error_handler(_err: PathError, req: &HttpRequest) -> actix_web::Error {
    ApiError::resource_not_found(req.path()).into()
}
