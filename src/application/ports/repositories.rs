//! Repository Ports
//!
//! Persistence abstractions; the SQLite implementations live in
//! `infrastructure::persistence::sqlite`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::catalog::{Item, NewItem, NewTag, Store, Tag};
use crate::domain::user::User;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Store Repository
// ============================================================================

#[async_trait]
pub trait StoreRepositoryPort: Send + Sync {
    /// Insert a store; a taken name yields `Duplicate`
    async fn create(&self, name: &str) -> Result<Store, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Store>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Store>, RepositoryError>;

    /// Delete a store together with its items, tags and their associations
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Item Repository
// ============================================================================

#[async_trait]
pub trait ItemRepositoryPort: Send + Sync {
    async fn create(&self, item: &NewItem) -> Result<Item, RepositoryError>;

    /// Insert with a caller supplied id (PUT upsert path)
    async fn insert_with_id(&self, id: i64, item: &NewItem) -> Result<Item, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError>;

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Item>, RepositoryError>;

    /// Items linked to a tag
    async fn find_by_tag(&self, tag_id: i64) -> Result<Vec<Item>, RepositoryError>;

    /// Replace name and price, leaving store and tags untouched
    async fn update(&self, id: i64, name: &str, price: Decimal) -> Result<Item, RepositoryError>;

    /// Delete an item and its tag associations
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepositoryPort: Send + Sync {
    async fn create(&self, tag: &NewTag) -> Result<Tag, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepositoryError>;

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Tag>, RepositoryError>;

    /// Tags linked to an item
    async fn find_by_item(&self, item_id: i64) -> Result<Vec<Tag>, RepositoryError>;

    /// Number of items currently linked to a tag
    async fn count_items(&self, tag_id: i64) -> Result<i64, RepositoryError>;

    async fn is_linked(&self, item_id: i64, tag_id: i64) -> Result<bool, RepositoryError>;

    /// Link an item and a tag; linking an existing pair is a no-op
    async fn link(&self, item_id: i64, tag_id: i64) -> Result<(), RepositoryError>;

    /// Remove a link, returning false when it did not exist
    async fn unlink(&self, item_id: i64, tag_id: i64) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// Insert a user; a taken username yields `Duplicate`
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
