//! # Authentication Module
//!
//! Sessions are identified by the token returned from OTP verification,
//! sent back as `Authorization: Bearer <token>`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use parkeasy_core::errors::ParkError;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, session::Session, ApiState};

/// Reads a session token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// Extractor that requires a live session.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Extractor for endpoints that work with or without a session.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError(ParkError::Authentication("Missing session token".to_string()))
        })?;

        state
            .sessions
            .get(token)
            .await
            .map(CurrentSession)
            .ok_or_else(|| AppError(ParkError::Authentication("Unknown or expired session".to_string())))
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let session = match bearer_token(&parts.headers) {
            Some(token) => state.sessions.get(token).await,
            None => None,
        };
        Ok(MaybeSession(session))
    }
}
