//! Infrastructure Layer
//!
//! Concrete implementations of the application ports, plus the HTTP surface

pub mod auth;
pub mod http;
pub mod persistence;

pub use auth::{Argon2PasswordHasher, JwtTokenService};
pub use persistence::sqlite::{
    SqliteItemRepository, SqliteStoreRepository, SqliteTagRepository, SqliteUserRepository,
};
