//! Stores API - store/item/tag catalog with user accounts
//!
//! Layout: DDD + CQRS + Hexagonal Architecture
//!
//! Domain layer (domain/):
//! - Catalog Context: stores, items, tags and their linking rules
//! - User Context: accounts and credentials
//!
//! Application layer (application/):
//! - Ports: repositories, password hasher, token service
//! - Commands / Queries: one handler per use case
//!
//! Infrastructure layer (infrastructure/):
//! - Persistence: SQLite repositories
//! - Auth: Argon2 hashing, HS256 access tokens
//! - HTTP: axum routes, validation, views, auth middleware

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use infrastructure::http::{AppState, Repositories};
use infrastructure::persistence::sqlite::{
    DbPool, SqliteItemRepository, SqliteStoreRepository, SqliteTagRepository,
    SqliteUserRepository,
};
use infrastructure::{Argon2PasswordHasher, JwtTokenService};

pub use config::{load_config, AppConfig};

/// Wire SQLite repositories and auth adapters into the shared state
pub fn build_state(pool: &DbPool, jwt_secret: &str, token_expiry_secs: u64) -> AppState {
    let repos = Repositories {
        stores: Arc::new(SqliteStoreRepository::new(pool.clone())),
        items: Arc::new(SqliteItemRepository::new(pool.clone())),
        tags: Arc::new(SqliteTagRepository::new(pool.clone())),
        users: Arc::new(SqliteUserRepository::new(pool.clone())),
    };

    AppState::new(
        repos,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenService::new(jwt_secret, token_expiry_secs)),
    )
}
