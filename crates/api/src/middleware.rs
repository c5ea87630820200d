use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use tasklane_access::{AccessPolicy, Decision};
use tasklane_auth::{SessionSnapshot, TokenCodec};

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenCodec>,
}

/// Build the per-request session snapshot from the bearer token, if any.
///
/// An absent or invalid token yields an anonymous snapshot rather than an
/// immediate 401: the guard decides what happens to the request.
pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let snapshot = match extract_bearer(req.headers()) {
        Some(token) => match state.tokens.decode(token, Utc::now()) {
            Ok(claims) => SessionSnapshot::authenticated(claims.to_user()),
            Err(err) => {
                tracing::debug!(error = %err, "rejected bearer token; treating request as anonymous");
                SessionSnapshot::anonymous()
            }
        },
        None => SessionSnapshot::anonymous(),
    };

    req.extensions_mut().insert(snapshot);
    next.run(req).await
}

/// Evaluate the access guard for the request path and apply its decision.
pub async fn guard_middleware(
    State(policy): State<Arc<AccessPolicy>>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let snapshot = req
        .extensions()
        .get::<SessionSnapshot>()
        .cloned()
        .unwrap_or_else(SessionSnapshot::anonymous);

    let evaluation = policy.evaluate(&snapshot, req.uri().path());

    match evaluation.decision {
        Decision::Grant => next.run(req).await,
        Decision::Redirect(command) => {
            tracing::debug!(
                path = %req.uri().path(),
                redirect = %command.target,
                "access denied; redirecting"
            );
            see_other(&command.location())
        }
        // Server-side snapshots are always initialized; this arm exists for
        // parity with the decision surface.
        Decision::RenderFallback => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "1")],
        )
            .into_response(),
    }
}

fn see_other(location: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
