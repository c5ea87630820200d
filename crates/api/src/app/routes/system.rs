//! System endpoints: liveness, identity echo, filtered navigation.

use std::sync::Arc;

use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use tasklane_access::NavTree;
use tasklane_auth::{SessionSnapshot, role_set};

use crate::app::errors;

/// GET /health - liveness probe (outside the guard).
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /whoami - echo the authenticated identity.
pub async fn whoami(Extension(snapshot): Extension<SessionSnapshot>) -> axum::response::Response {
    match snapshot.user {
        Some(user) => {
            let roles: Vec<&str> = role_set(Some(&user)).iter().map(|r| r.as_str()).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "user_id": user.id.to_string(),
                    "display_name": user.display_name,
                    "email": user.email,
                    "status": user.status,
                    "roles": roles,
                })),
            )
                .into_response()
        }
        // The guard redirects anonymous requests before this handler runs.
        None => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "no active session",
        ),
    }
}

/// GET /nav - the navigation tree pruned to the current session's roles.
pub async fn nav(
    Extension(snapshot): Extension<SessionSnapshot>,
    Extension(tree): Extension<Arc<NavTree>>,
) -> axum::response::Response {
    let filtered = tree.visible_to_user(snapshot.user.as_ref());
    (StatusCode::OK, Json(json!({ "nav": filtered }))).into_response()
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "no such route")
}
