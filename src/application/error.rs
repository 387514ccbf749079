//! Application errors
//!
//! Shared error type for command and query handlers

use thiserror::Error;

use crate::application::ports::{PasswordHashError, RepositoryError, TokenError};
use crate::domain::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// Input passed schema validation but is still unusable
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A field the schema treats as optional is required on this path
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Tag is not linked to item.")]
    LinkNotFound { item_id: i64, tag_id: i64 },

    #[error("{0}")]
    BusinessRuleViolation(String),

    #[error("{0}")]
    Conflict(String),

    /// Unknown username or wrong password; deliberately indistinguishable
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        Self::BusinessRuleViolation(err.to_string())
    }
}

impl From<PasswordHashError> for ApplicationError {
    fn from(err: PasswordHashError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<TokenError> for ApplicationError {
    fn from(err: TokenError) -> Self {
        Self::InternalError(err.to_string())
    }
}
