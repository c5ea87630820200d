//! HTTP application wiring (Axum router + guard middleware).
//!
//! Structure:
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses
//! - `config.rs` (crate root): static route/nav tables loaded at startup

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use tasklane_auth::Hs256TokenCodec;

use crate::config::AppConfig;
use crate::middleware::{self, AuthState};

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: AppConfig, jwt_secret: String) -> Router {
    let auth_state = AuthState {
        tokens: Arc::new(Hs256TokenCodec::from_secret(jwt_secret.as_bytes())),
    };
    let policy = Arc::new(config.policy());
    let nav = Arc::new(config.nav.clone());

    // Guarded routes: the session middleware builds the snapshot, then the
    // guard middleware applies the access decision. The fallback lives
    // inside this router so unrouted paths still go through the guard.
    let guarded = routes::router().layer(Extension(nav)).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::session_middleware,
            ))
            .layer(axum::middleware::from_fn_with_state(
                policy,
                middleware::guard_middleware,
            )),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(guarded)
}
