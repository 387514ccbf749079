//! Entity graphs assembled for responses
//!
//! Relations are loaded one level deep only. An item carries its store and
//! tags, but those tags do not carry their items again.

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ItemRepositoryPort, StoreRepositoryPort, TagRepositoryPort};
use crate::domain::catalog::{Item, Store, Tag};

#[derive(Debug, Clone)]
pub struct StoreDetails {
    pub store: Store,
    pub items: Vec<Item>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct ItemDetails {
    pub item: Item,
    pub store: Store,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct TagDetails {
    pub tag: Tag,
    pub store: Store,
    pub items: Vec<Item>,
}

/// Loads the one-level relations of catalog entities
#[derive(Clone)]
pub struct CatalogDetailsLoader {
    store_repo: Arc<dyn StoreRepositoryPort>,
    item_repo: Arc<dyn ItemRepositoryPort>,
    tag_repo: Arc<dyn TagRepositoryPort>,
}

impl CatalogDetailsLoader {
    pub fn new(
        store_repo: Arc<dyn StoreRepositoryPort>,
        item_repo: Arc<dyn ItemRepositoryPort>,
        tag_repo: Arc<dyn TagRepositoryPort>,
    ) -> Self {
        Self {
            store_repo,
            item_repo,
            tag_repo,
        }
    }

    pub async fn store(&self, store: Store) -> Result<StoreDetails, ApplicationError> {
        let items = self.item_repo.find_by_store(store.id).await?;
        let tags = self.tag_repo.find_by_store(store.id).await?;
        Ok(StoreDetails { store, items, tags })
    }

    pub async fn item(&self, item: Item) -> Result<ItemDetails, ApplicationError> {
        let store = self.owning_store(item.store_id).await?;
        let tags = self.tag_repo.find_by_item(item.id).await?;
        Ok(ItemDetails { item, store, tags })
    }

    pub async fn tag(&self, tag: Tag) -> Result<TagDetails, ApplicationError> {
        let store = self.owning_store(tag.store_id).await?;
        let items = self.item_repo.find_by_tag(tag.id).await?;
        Ok(TagDetails { tag, store, items })
    }

    async fn owning_store(&self, store_id: i64) -> Result<Store, ApplicationError> {
        self.store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", store_id))
    }
}
