//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs issued elsewhere; this module only verifies them
//! and turns the numeric `sub` claim into the caller's identity.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use common::UserId;
use domain::CallerIdentity;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, as a decimal string)
    pub sub: String,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Verifies bearer tokens against a shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Validate a token and resolve the caller it was issued to.
    pub fn verify(&self, token: &str) -> Result<CallerIdentity, ApiError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::Unauthorized("Token has expired".into()),
                _ => ApiError::Unauthorized("Invalid token".into()),
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".into()))?;

        Ok(CallerIdentity::new(user_id))
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware rejecting requests without a valid bearer token.
///
/// On success the caller's [`CallerIdentity`] is stored in the request
/// extensions for handlers to pick up.
pub async fn require_auth(
    State(verifier): State<JwtVerifier>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is required".into()))?;

    let token = header
        .to_str()
        .ok()
        .and_then(extract_bearer_token)
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".into()))?;

    let caller = verifier.verify(token)?;
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}
