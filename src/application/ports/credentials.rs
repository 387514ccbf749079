//! Credential Ports - password hashing and access tokens
//!
//! Implementations live in `infrastructure::auth`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash password: {0}")]
    HashFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("The token has expired.")]
    Expired,

    #[error("Signature verification failed.")]
    Invalid,

    #[error("Failed to issue token: {0}")]
    IssueFailed(String),
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: i64,
    pub token_id: String,
}

/// One-way salted password hashing
pub trait PasswordHasherPort: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Returns false for a wrong password as well as for an unparsable hash
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

/// Signed access tokens keyed to a user id
pub trait TokenServicePort: Send + Sync {
    fn issue(&self, user_id: i64) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<TokenIdentity, TokenError>;
}
