// collabsync-service/src/models/mod.rs
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub mod user;
pub use user::*;

pub mod workspace;
pub use workspace::*;

pub mod video;
pub use video::*;

// Custom error types
//
// Every failure the service produces maps to exactly one variant, and every
// variant maps to a stable machine-readable kind plus a human message.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    PermissionDenied(String),
    Validation(String),
    PublishFailed(String),
    ExternalService(String),
    // A multi-step mutation partially completed, e.g. a video document was
    // persisted but the workspace link failed. Fatal: logged for operator
    // remediation, never silently retried.
    StoreInconsistency(String),
    Internal,
}

impl ServiceError {
    // Stable error kind carried in every error response body
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::PermissionDenied(_) => "permission_denied",
            ServiceError::Validation(_) => "validation_error",
            ServiceError::PublishFailed(_) => "publish_failed",
            ServiceError::ExternalService(_) => "external_service_error",
            ServiceError::StoreInconsistency(_) => "store_inconsistency",
            ServiceError::Internal => "internal_error",
        }
    }
}

// Implement Display for ServiceError
impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::PublishFailed(msg) => write!(f, "Publish failed: {}", msg),
            ServiceError::ExternalService(msg) => write!(f, "External service error: {}", msg),
            ServiceError::StoreInconsistency(msg) => write!(f, "Store inconsistency: {}", msg),
            ServiceError::Internal => write!(f, "Internal server error"),
        }
    }
}

// Implement std::error::Error for ServiceError
impl std::error::Error for ServiceError {}

// Implement ResponseError for ServiceError
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });

        match self {
            ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
            ServiceError::PermissionDenied(_) => HttpResponse::Forbidden().json(body),
            ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
            ServiceError::PublishFailed(_) => HttpResponse::InternalServerError().json(body),
            ServiceError::ExternalService(_) => HttpResponse::BadGateway().json(body),
            ServiceError::StoreInconsistency(_) => HttpResponse::InternalServerError().json(body),
            ServiceError::Internal => HttpResponse::InternalServerError().json(body),
        }
    }
}

// JWT claims structure for authentication
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}
