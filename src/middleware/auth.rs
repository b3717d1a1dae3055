use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// Resolves an access token to the user it was issued for
///
/// Sign-up, login and token refresh happen in the hosted auth service;
/// this side only checks tokens it has already handed out.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the user id, or `None` if the token is not valid
    async fn authenticate(&self, token: &str) -> AppResult<Option<Uuid>>;
}

/// Claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub aud: String,
    pub exp: usize,
}

/// Verifies HS256 access tokens signed with the shared secret
pub struct JwtAuthProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait::async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn authenticate(&self, token: &str) -> AppResult<Option<Uuid>> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(Some(data.claims.sub)),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                Ok(None)
            }
        }
    }
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        state
            .auth
            .authenticate(token)
            .await?
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}
