//! Tag Query Handlers

use std::sync::Arc;

use super::{CatalogDetailsLoader, TagDetails};
use crate::application::error::ApplicationError;
use crate::application::ports::{StoreRepositoryPort, TagRepositoryPort};
use crate::application::queries::{GetTag, ListStoreTags};

/// GetTag Handler
pub struct GetTagHandler {
    tag_repo: Arc<dyn TagRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl GetTagHandler {
    pub fn new(tag_repo: Arc<dyn TagRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { tag_repo, details }
    }

    pub async fn handle(&self, query: GetTag) -> Result<TagDetails, ApplicationError> {
        let tag = self
            .tag_repo
            .find_by_id(query.tag_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Tag", query.tag_id))?;

        self.details.tag(tag).await
    }
}

/// ListStoreTags Handler
pub struct ListStoreTagsHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    tag_repo: Arc<dyn TagRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl ListStoreTagsHandler {
    pub fn new(
        store_repo: Arc<dyn StoreRepositoryPort>,
        tag_repo: Arc<dyn TagRepositoryPort>,
        details: CatalogDetailsLoader,
    ) -> Self {
        Self {
            store_repo,
            tag_repo,
            details,
        }
    }

    pub async fn handle(&self, query: ListStoreTags) -> Result<Vec<TagDetails>, ApplicationError> {
        // 404 for an unknown store rather than an empty list
        self.store_repo
            .find_by_id(query.store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", query.store_id))?;

        let tags = self.tag_repo.find_by_store(query.store_id).await?;

        let mut result = Vec::with_capacity(tags.len());
        for tag in tags {
            result.push(self.details.tag(tag).await?);
        }
        Ok(result)
    }
}
