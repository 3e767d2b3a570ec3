// collabsync-service/src/utils/mod.rs
use crate::models::{Claims, ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use regex::Regex;
use std::env;

pub mod entity_store;

// JWT utility functions
//
// Token issuance lives in the companion auth service; this side only verifies.
// `generate_token` exists for operational tooling and tests.
pub mod jwt {
    use super::*;

    // Get JWT secret from environment or use default
    fn get_jwt_secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| "collabsync_super_secret_key".to_string())
    }

    // Generate a new JWT token for a user id
    pub fn generate_token(user_id: &str) -> Result<String, ServiceError> {
        let secret = get_jwt_secret();
        let expiration = (Utc::now() + Duration::days(7)).timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .map_err(|_| ServiceError::Internal)
    }

    // Validate and decode a JWT token
    pub fn decode_token(token: &str) -> Result<Claims, ServiceError> {
        let secret = get_jwt_secret();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::PermissionDenied("invalid authentication token".to_string()))
    }

    // Extract JWT from Authorization header
    pub fn extract_token_from_header(auth_header: &str) -> Result<String, ServiceError> {
        if !auth_header.starts_with("Bearer ") {
            return Err(ServiceError::PermissionDenied(
                "malformed Authorization header".to_string(),
            ));
        }

        Ok(auth_header.trim_start_matches("Bearer ").to_string())
    }
}

// Request-surface validation, mirroring the upstream validator chains.
// Failures are turned into ValidationError before anything reaches the core.
pub mod validators {
    use super::*;

    lazy_static! {
        static ref URL_RE: Regex =
            Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("static URL pattern compiles");
    }

    // Entity ids must be at least 6 characters long
    pub fn validate_id(name: &str, value: &str) -> Result<(), ServiceError> {
        if value.len() < 6 {
            return Err(ServiceError::Validation(format!(
                "{} must be at least 6 characters long",
                name
            )));
        }
        Ok(())
    }

    pub fn validate_url(name: &str, value: &str) -> Result<(), ServiceError> {
        if !URL_RE.is_match(value) {
            return Err(ServiceError::Validation(format!(
                "{} is not a valid URL",
                name
            )));
        }
        Ok(())
    }
}

// Middleware for JWT authentication.
// POST /api/user is exempt: account creation happens before a token exists.
pub mod auth_middleware {
    use super::*;
    use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
    use actix_web::http::{header, Method};
    use actix_web::{error::ErrorUnauthorized, Error, HttpMessage};
    use futures::future::{ok, Ready};
    use std::future::Future;
    use std::pin::Pin;

    pub struct Authentication;

    impl<S, B> Transform<S, ServiceRequest> for Authentication
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Transform = AuthenticationMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(AuthenticationMiddleware { service })
        }
    }

    pub struct AuthenticationMiddleware<S> {
        service: S,
    }

    impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            // Account creation is the one unauthenticated entry point
            if req.method() == Method::POST && req.path() == "/api/user" {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await });
            }

            let auth_header = req.headers().get(header::AUTHORIZATION);

            if let Some(auth_header) = auth_header {
                if let Ok(auth_str) = auth_header.to_str() {
                    if let Ok(token) = jwt::extract_token_from_header(auth_str) {
                        if let Ok(claims) = jwt::decode_token(&token) {
                            req.extensions_mut().insert(claims);
                            let fut = self.service.call(req);
                            return Box::pin(async move { fut.await });
                        }
                    }
                }
            }

            Box::pin(async move { Err(ErrorUnauthorized("Unauthorized")) })
        }
    }
}
