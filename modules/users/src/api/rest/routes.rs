use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::{delete, get, post};
use axum::{Extension, Router};

use crate::api::auth::{self, CredentialVerifier};
use crate::domain::service::UsersService;

use super::handlers;

/// Build the user collection router, mounted by the server under
/// `/api/users`.
///
/// Signup is open; reads and updates sit behind the user gate; listing
/// and deletion are admin-only.
pub fn router(service: Arc<UsersService>, verifier: Arc<dyn CredentialVerifier>) -> Router {
    Router::new()
        .route("/signup", post(handlers::register_user))
        .route(
            "/",
            get(handlers::list_users).route_layer(from_fn(auth::require_admin)),
        )
        .route(
            "/{id}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .route_layer(from_fn(auth::require_user)),
        )
        .route(
            "/{id}",
            delete(handlers::delete_user).route_layer(from_fn(auth::require_admin)),
        )
        .layer(Extension(service))
        .layer(Extension(verifier))
}
