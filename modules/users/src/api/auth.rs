//! Credential verification seam for the route gates.
//!
//! The shipped verifier is a stub that admits every request. It exists
//! so the routing layer is written against a real abstraction; replace
//! it with an implementation that checks actual credentials before
//! exposing this service outside a trusted network. Nothing here is a
//! security boundary until that happens.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use thiserror::Error;
use tracing::debug;

use super::rest::error::ApiError;

/// Role attached to a verified principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// Identity established by a [`CredentialVerifier`].
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Verification seam consulted by the route gates before a handler is
/// reached.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, headers: &HeaderMap) -> Result<Principal, AuthError>;
}

/// Admits every request with an administrative principal.
#[derive(Debug, Default)]
pub struct AllowAllVerifier;

#[async_trait]
impl CredentialVerifier for AllowAllVerifier {
    async fn verify(&self, _headers: &HeaderMap) -> Result<Principal, AuthError> {
        debug!("credential verification is stubbed; admitting request");
        Ok(Principal {
            subject: "anonymous".to_string(),
            role: Role::Admin,
        })
    }
}

/// Gate for user-level routes.
pub async fn require_user(
    Extension(verifier): Extension<Arc<dyn CredentialVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    match verifier.verify(request.headers()).await {
        Ok(_) => next.run(request).await,
        Err(_) => ApiError::unauthorized("User authorization failed").into_response(),
    }
}

/// Gate for admin-only routes.
pub async fn require_admin(
    Extension(verifier): Extension<Arc<dyn CredentialVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    match verifier.verify(request.headers()).await {
        Ok(principal) if principal.is_admin() => next.run(request).await,
        _ => ApiError::unauthorized("Admin authorization failed").into_response(),
    }
}
