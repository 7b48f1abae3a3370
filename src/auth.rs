use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::ApiError};

/// Claims
///
/// The payload structure expected inside the bearer token. The token is
/// signed with the server's shared secret; the payload itself is the full
/// identity, so no user table lookup happens on the request path.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the caller.
    pub name: String,
    /// Group memberships, e.g. `["basic"]` or `["moderator"]`.
    pub groups: Vec<String>,
}

/// Requester
///
/// The resolved identity of an authenticated request. Handlers take this as
/// an argument; the authorization policy decides what it may do.
#[derive(Debug, Clone)]
pub struct Requester {
    pub name: String,
    pub groups: Vec<String>,
}

/// Requester Extractor Implementation
///
/// Implements axum's FromRequestParts, making `Requester` usable as a
/// function argument in any handler. Extraction performs:
/// 1. `Authorization` header retrieval (absence is a client error).
/// 2. `Bearer ` scheme check.
/// 3. Signature + payload verification against the configured secret and
///    algorithm.
///
/// Rejection: `ApiError::InvalidCredential`, rendered as 422 with a
/// `{"detail": ...}` body. A wrong algorithm in the token header, a bad
/// signature, or a payload missing `name`/`groups` all land here.
///
/// The credential format carries no `exp` claim, so expiry validation is
/// switched off.
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::InvalidCredential("authorization header missing".to_string())
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::InvalidCredential("authorization scheme must be Bearer".to_string())
        })?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.jwt_alg);
        // Tokens carry only name + groups; there is no exp claim to check.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| ApiError::InvalidCredential(e.to_string()))?;

        Ok(Requester {
            name: token_data.claims.name,
            groups: token_data.claims.groups,
        })
    }
}
