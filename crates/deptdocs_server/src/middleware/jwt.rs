//! Bearer-token authentication.
//!
//! Validates an HS256 JWT and inserts the resulting [`Principal`] as a request
//! extension. Handlers take `Extension<Principal>`; nothing downstream reads
//! the token.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use deptdocs_core::principal::{JwtClaims, Principal};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::error::AppError;

#[derive(Clone)]
pub struct JwtConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn principal_from_token(&self, token: &str) -> Result<Principal, AppError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                AppError::unauthorized("invalid bearer token")
            })?;
        Ok(Principal::from_jwt_claims(&data.claims)?)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn jwt_auth(mut req: Request, next: Next) -> Result<Response, AppError> {
    let principal = {
        let config = req.extensions().get::<JwtConfig>().ok_or_else(|| {
            AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "authentication not configured")
        })?;
        let token = bearer_token(req.headers())
            .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;
        config.principal_from_token(token)?
    };
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
