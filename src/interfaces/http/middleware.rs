//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use crate::application::{AuthService, AuthenticatedUser};

/// State for [`auth_middleware`]
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer-token authentication.
///
/// Resolves the token to a live session and stores the
/// [`AuthenticatedUser`] in the request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return ApiError::unauthorized("Missing authorization header").into_response();
    };

    let Some(token) = extract_token(auth_header) else {
        return ApiError::unauthorized("Expected a Bearer token").into_response();
    };

    match state.auth.authenticate(token).await {
        Ok(user) => {
            debug!(user_id = user.user_id, role = %user.role_name, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Handler extractor for the caller placed by [`auth_middleware`].
pub struct Caller(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Caller)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer   "), None);
    }
}
