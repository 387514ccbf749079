//! Bearer token authentication middleware

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::error::ErrorLogged;
use crate::application::{TokenError, TokenServicePort};

/// Authenticated caller, inserted into request extensions by [`require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub token_id: String,
}

/// Token failures. Bodies follow the conventions clients of this API expect.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    Expired,
    Invalid,
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => AuthError::Expired,
            _ => AuthError::Invalid,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = match self {
            AuthError::MissingToken => json!({
                "description": "Request does not contain an access token.",
                "error": "authorization_required"
            }),
            AuthError::Expired => json!({
                "message": "The token has expired.",
                "error": "token_expired"
            }),
            AuthError::Invalid => json!({
                "message": "Signature verification failed.",
                "error": "invalid_token"
            }),
        };
        tracing::warn!(error = ?self, "Request not authenticated");

        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response.extensions_mut().insert(ErrorLogged);
        response
    }
}

/// Require a valid access token on the wrapped routes
pub async fn require_auth(
    State(tokens): State<Arc<dyn TokenServicePort>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&headers).ok_or(AuthError::MissingToken)?;
    let identity = tokens.verify(token)?;

    request.extensions_mut().insert(AuthUser {
        user_id: identity.user_id,
        token_id: identity.token_id,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme != "Bearer" || token.is_empty() {
        return None;
    }
    Some(token)
}
