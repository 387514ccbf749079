//! Catalog Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Make sure item and tag belong to the same store.")]
    StoreMismatch { item_store_id: i64, tag_store_id: i64 },

    #[error("Could not delete tag. Make sure tag is not associated with any items.")]
    TagInUse { tag_id: i64, linked_items: i64 },
}
