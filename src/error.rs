//! Domain error types
//!
//! Every failure the lifecycle services can surface, plus the mapping to the
//! fixed API error body `{message, timestamp, timezone}`.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum DomainError {
    /// Book id does not resolve
    BookNotFound,
    /// Person id (or a book's holder reference) does not resolve
    PersonNotFound,
    /// Required-field constraint violated; holds the concatenated field text
    Validation(String),
    /// Listing with no books yet
    NoBooks,
    /// Listing with no readers yet
    NoReaders,
    /// A person holds no books
    NoBooksInUse,
    /// The book has no current holder
    FreeBook,
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    pub fn message(&self) -> String {
        match self {
            DomainError::BookNotFound => "Book not found".to_string(),
            DomainError::PersonNotFound => "Person not found".to_string(),
            DomainError::Validation(msg) => msg.clone(),
            DomainError::NoBooks => "There are no books in this library".to_string(),
            DomainError::NoReaders => "There are no readers in library".to_string(),
            DomainError::NoBooksInUse => "There are no books".to_string(),
            DomainError::FreeBook => "Free book".to_string(),
            DomainError::Database(msg) => msg.clone(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::BookNotFound | DomainError::PersonNotFound => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NoBooks
            | DomainError::NoReaders
            | DomainError::NoBooksInUse
            | DomainError::FreeBook => StatusCode::NO_CONTENT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DomainError {}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "timezone": "UTC",
        }));
        (self.status_code(), body).into_response()
    }
}
