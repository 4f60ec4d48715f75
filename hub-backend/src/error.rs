//! Error taxonomy shared by every controller.
//!
//! Each variant maps to one HTTP status; the body is always
//! `{"error": "<message>"}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use hub_types::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// Malformed body, missing parameter or unsafe input
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    /// Never existed and expired look the same to callers
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type HubResult<T> = Result<T, HubError>;

impl ResponseError for HubError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Io(e) = self {
            log::error!("I/O failure: {}", e);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
