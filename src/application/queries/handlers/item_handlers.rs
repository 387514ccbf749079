//! Item Query Handlers

use std::sync::Arc;

use super::{CatalogDetailsLoader, ItemDetails};
use crate::application::error::ApplicationError;
use crate::application::ports::ItemRepositoryPort;
use crate::application::queries::{GetItem, ListItems};

/// GetItem Handler
pub struct GetItemHandler {
    item_repo: Arc<dyn ItemRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl GetItemHandler {
    pub fn new(item_repo: Arc<dyn ItemRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { item_repo, details }
    }

    pub async fn handle(&self, query: GetItem) -> Result<ItemDetails, ApplicationError> {
        let item = self
            .item_repo
            .find_by_id(query.item_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Item", query.item_id))?;

        self.details.item(item).await
    }
}

/// ListItems Handler
pub struct ListItemsHandler {
    item_repo: Arc<dyn ItemRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl ListItemsHandler {
    pub fn new(item_repo: Arc<dyn ItemRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { item_repo, details }
    }

    pub async fn handle(&self, _query: ListItems) -> Result<Vec<ItemDetails>, ApplicationError> {
        let items = self.item_repo.find_all().await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(self.details.item(item).await?);
        }
        Ok(result)
    }
}
