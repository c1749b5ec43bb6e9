//! Mapping of domain failures onto HTTP responses

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use std::collections::HashMap;
use validator::ValidationErrors;

use ns_core::DomainError;
use ns_shared::{error_codes, ErrorResponse};

/// Error returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// DTO validation failed; messages per field
    #[error("Invalid request data")]
    InvalidRequest { fields: HashMap<String, Vec<String>> },

    /// Body or query string could not be decoded
    #[error("Malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Validation { message, .. }) => message.clone(),
            ApiError::Domain(DomainError::NotFound { resource }) => format!("{} not found", resource),
            ApiError::Domain(DomainError::RateLimited { retry_after_seconds }) => format!(
                "Too many requests. Please try again in {} seconds",
                retry_after_seconds
            ),
            ApiError::Domain(DomainError::Upstream { provider, .. }) => {
                format!("{} is currently unavailable. Please try again later", provider)
            }
            ApiError::Domain(DomainError::Timeout { .. }) => {
                "The request took too long. Please try again".to_string()
            }
            ApiError::Domain(DomainError::Unauthorized) => "Authentication required".to_string(),
            ApiError::Domain(DomainError::Configuration { .. }) => {
                "This feature is not available right now".to_string()
            }
            ApiError::Domain(DomainError::Internal { .. }) => "An internal error occurred".to_string(),
            ApiError::InvalidRequest { .. } => "Invalid request data".to_string(),
            ApiError::BadRequest(message) => message.clone(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.code(),
            ApiError::InvalidRequest { .. } => error_codes::VALIDATION_ERROR,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::InvalidRequest { fields }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                DomainError::Upstream { .. } => StatusCode::BAD_GATEWAY,
                DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::InvalidRequest { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let mut body = ErrorResponse::new(self.code(), self.message());
        match self {
            ApiError::Domain(DomainError::Validation { field, .. }) => {
                body = body.add_detail("field", field);
            }
            ApiError::Domain(DomainError::RateLimited { retry_after_seconds }) => {
                body = body.add_detail("retry_after_seconds", retry_after_seconds);
            }
            ApiError::InvalidRequest { fields } => {
                body = body.add_detail("fields", fields);
            }
            _ => {}
        }

        let mut response = HttpResponse::build(status);
        if let ApiError::Domain(DomainError::RateLimited { retry_after_seconds }) = self {
            response.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        response.json(body)
    }
}
