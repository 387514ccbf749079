//! Path id extraction

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

pub const URL_NOT_FOUND: &str = "The requested URL was not found on the server.";

/// Integer path parameters. A segment that does not parse means the route
/// does not exist, so the rejection is a 404 rather than a 400.
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(IdPath(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, error = %rejection, "Unparsable path id");
                Err(ApiError::NotFound(URL_NOT_FOUND.to_string()))
            }
        }
    }
}

/// Router fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound(URL_NOT_FOUND.to_string())
}
