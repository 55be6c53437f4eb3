//! HTTP surface: axum router, shared state, and the credential-header gate

pub mod error;
pub mod handlers;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};

use crate::auth::SharedVerifier;
use crate::store::BranchStore;
use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: BranchStore,
    pub verifier: SharedVerifier,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/branches", get(handlers::list_branches).post(handlers::create_branch))
        .route("/api/branches/import", post(handlers::import_branches))
        .route("/api/branches/export", get(handlers::export_branches))
        .route(
            "/api/branches/{id}",
            put(handlers::update_branch).delete(handlers::delete_branch),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_credentials,
        ))
        // Login sits outside the gate
        .route("/api/auth/login", post(handlers::login))
        .with_state(state)
}

/// Gate for everything under `/api/branches`: the `username` and `password`
/// headers must satisfy the credential verifier. Absence or mismatch is a
/// 401; credentials are read per-request, never stored.
async fn require_credentials(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // Read both headers into owned values up front: holding a borrow of the
    // request across next.run() would make this future !Send
    let username = request
        .headers()
        .get("username")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let password = request
        .headers()
        .get("password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if state.verifier.verify(&username, &password) {
        next.run(request).await
    } else {
        ApiError::unauthorized("Invalid credentials").into_response()
    }
}
