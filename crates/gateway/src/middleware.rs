//! Middleware for authentication and other cross-cutting concerns.

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::GatewayError;
use crate::state::GatewayState;

/// Identity attached to a request after its bearer token verified.
#[derive(Debug, Clone)]
pub struct AuthenticatedEmail(pub String);

/// Authentication middleware guarding protected routes.
///
/// Requires `Authorization: Bearer <token>`; any malformed header is the same
/// uniform unauthorized as a bad token. On success the verified email is
/// placed in the request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(header_value).ok_or(GatewayError::Unauthorized)?;

    let email = state
        .tokens()
        .verify(token)
        .map_err(|_| GatewayError::Unauthorized)?;

    request.extensions_mut().insert(AuthenticatedEmail(email));

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization` header value. The scheme must be
/// exactly `Bearer` and the token segment non-empty.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// CORS restricted to the single configured origin.
pub fn create_cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("invalid CORS origin {allowed_origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Request/response logging middleware.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_accepts_the_exact_form() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_no_token() {
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn missing_token_segment_yields_no_token() {
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Bearer    ")), None);
    }

    #[test]
    fn other_schemes_yield_no_token() {
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(Some("bearer abc")), None);
        assert_eq!(bearer_token(Some("abc.def.ghi")), None);
    }

    #[test]
    fn cors_layer_rejects_garbage_origins() {
        assert!(create_cors_layer("http://localhost:3000").is_ok());
        assert!(create_cors_layer("not a header\nvalue").is_err());
    }
}
