//! Authentication middleware for the server
//!
//! The public estimator and lead routes are open. Client-portal routes
//! (`/api/portal/...`) require `Authorization: Bearer <portal token>`.

use super::error::ApiError;
use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, Method},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::Layer;

/// Path prefix of the token-protected routes
pub const PORTAL_PREFIX: &str = "/api/portal/";

/// Authentication layer that validates Bearer tokens on portal routes
#[derive(Clone)]
pub struct AuthLayer {
    token: Arc<String>,
}

impl AuthLayer {
    pub fn new(token: String) -> Self {
        Self {
            token: Arc::new(token),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            token: self.token.clone(),
        }
    }
}

/// The actual middleware service
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    token: Arc<String>,
}

/// Compare without short-circuiting on the first differing byte
fn tokens_equal(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

fn bearer_matches(req: &Request, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|provided| tokens_equal(provided.as_bytes(), token.as_bytes()))
        .unwrap_or(false)
}

impl<S> tower::Service<Request> for AuthMiddleware<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let token = self.token.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Skip auth for CORS preflight OPTIONS requests
            if req.method() == Method::OPTIONS {
                return inner.call(req).await;
            }

            if !req.uri().path().starts_with(PORTAL_PREFIX) || bearer_matches(&req, &token) {
                return inner.call(req).await;
            }

            log::warn!("Rejected unauthenticated request to {}", req.uri().path());
            Ok(ApiError::Unauthorized.into_response())
        })
    }
}

/// Generate a random portal token
pub fn generate_auth_token() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_generate_auth_token() {
        let token = generate_auth_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_auth_token());
    }

    #[test]
    fn test_bearer_matches() {
        let req = Request::builder()
            .uri("/api/portal/onboarding/suggest")
            .header(AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        assert!(bearer_matches(&req, "secret"));
        assert!(!bearer_matches(&req, "other"));

        let bare = Request::builder()
            .uri("/api/portal/onboarding/suggest")
            .header(AUTHORIZATION, "secret")
            .body(Body::empty())
            .unwrap();
        assert!(!bearer_matches(&bare, "secret"));
    }

    #[test]
    fn test_tokens_equal() {
        assert!(tokens_equal(b"secret", b"secret"));
        assert!(!tokens_equal(b"secret", b"secreT"));
        assert!(!tokens_equal(b"secret", b"secret-longer"));
        assert!(!tokens_equal(b"", b"secret"));
    }

    #[test]
    fn test_empty_token_never_matches() {
        let req = Request::builder()
            .uri("/api/portal/onboarding/suggest")
            .header(AUTHORIZATION, "Bearer ")
            .body(Body::empty())
            .unwrap();
        assert!(!bearer_matches(&req, ""));
    }
}
