//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type every handler returns. It maps the
//! failure classes of the API onto HTTP responses:
//!
//! - validation failures carry field-level detail and answer 400,
//! - bad credentials and duplicate emails answer 400 with a plain message,
//! - missing or invalid tokens answer 401,
//! - missing records answer 200 with a `{"message": "Not found"}` body,
//! - anything unexpected answers 500 with a bare `Error` body.
//!
//! `From` implementations for the errors of `sqlx`, `jsonwebtoken`, `bcrypt`
//! and the blocking pool let callers propagate with `?`.

use actix_web::{
    error::{BlockingError, ResponseError},
    http::StatusCode,
    HttpResponse,
};
use serde_json::json;
use std::fmt;

use crate::validation::FieldError;

/// Body returned for records that do not exist or belong to another user.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed validation (HTTP 400 with field details).
    Validation(Vec<FieldError>),
    /// Request was well-formed but rejected, e.g. bad credentials (HTTP 400).
    BadRequest(String),
    /// Missing or invalid authentication token (HTTP 401).
    Unauthorized(String),
    /// The task does not exist or is owned by someone else.
    /// Clients of this API expect a 200 with a message body here.
    NotFound,
    /// Persistence or library failure. The detail is logged and never sent to
    /// the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                write!(f, "Validation Error: ")?;
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "{}", messages.join("; "))
            }
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::OK,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "message": errors
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().body(msg.clone()),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::NotFound => HttpResponse::Ok().json(json!({
                "message": NOT_FOUND_MESSAGE
            })),
            AppError::Internal(msg) => {
                log::error!("request failed: {}", msg);
                HttpResponse::InternalServerError().body("Error")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Internal(format!("database error: {}", error))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {:?}", error.kind()))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
