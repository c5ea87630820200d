use axum::{Router, routing::get};

pub mod system;

/// Router for everything governed by the access guard.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/nav", get(system::nav))
        .fallback(system::not_found)
}
