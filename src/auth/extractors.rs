use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::claims::{AdminClaims, CustomerClaims};
use super::jwt::JwtKeys;
use crate::error::AppError;

/// Caller holding a valid admin token. Any role passes.
pub struct AdminUser(pub AdminClaims);

/// Caller holding a valid customer token.
pub struct CustomerUser(pub CustomerClaims);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header"))
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = JwtKeys::from_ref(state).verify_admin(token).map_err(|_| {
            warn!("invalid or expired admin token");
            AppError::unauthenticated("Invalid or expired token")
        })?;
        Ok(AdminUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CustomerUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = JwtKeys::from_ref(state).verify_customer(token).map_err(|_| {
            warn!("invalid or expired customer token");
            AppError::unauthenticated("Invalid or expired token")
        })?;
        Ok(CustomerUser(claims))
    }
}
