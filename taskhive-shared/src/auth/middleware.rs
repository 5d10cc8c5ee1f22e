/// Authentication context for request handlers
///
/// The API server's JWT middleware validates the bearer token and inserts an
/// [`AuthContext`] into the request's extensions. Handlers receive the
/// authenticated user explicitly through the `AuthContext` extractor rather
/// than reading any ambient state.
///
/// # Example
///
/// ```ignore
/// use taskhive_shared::auth::middleware::AuthContext;
///
/// async fn protected_handler(auth: AuthContext) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

/// Error type for authentication failures at the request boundary
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header was supplied
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header was present but malformed
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),
}

/// Identity of the authenticated requester
///
/// Threaded explicitly through every service call so that each query can be
/// scoped to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user's ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Builds a context from a validated token's subject claim
    pub fn from_claims(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthContext {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or((StatusCode::UNAUTHORIZED, "Missing authentication context"))
    }
}
