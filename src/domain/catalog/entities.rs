//! Catalog Context - Entities
//!
//! Plain data structs. Relationships are resolved explicitly through the
//! repositories; nothing here loads lazily.

use rust_decimal::Decimal;

use super::CatalogError;

/// A store owning items and tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

/// An item sold by exactly one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
}

/// Item fields supplied by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
}

/// A tag scoped to one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub store_id: i64,
}

/// Tag fields supplied by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub store_id: i64,
}

impl Tag {
    /// Items may only carry tags of their own store.
    pub fn ensure_linkable_to(&self, item: &Item) -> Result<(), CatalogError> {
        if self.store_id != item.store_id {
            return Err(CatalogError::StoreMismatch {
                item_store_id: item.store_id,
                tag_store_id: self.store_id,
            });
        }
        Ok(())
    }

    /// A tag still attached to any item must not be deleted.
    pub fn ensure_deletable(&self, linked_items: i64) -> Result<(), CatalogError> {
        if linked_items > 0 {
            return Err(CatalogError::TagInUse {
                tag_id: self.id,
                linked_items,
            });
        }
        Ok(())
    }
}
