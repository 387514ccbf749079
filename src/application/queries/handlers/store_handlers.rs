//! Store Query Handlers

use std::sync::Arc;

use super::{CatalogDetailsLoader, StoreDetails};
use crate::application::error::ApplicationError;
use crate::application::ports::StoreRepositoryPort;
use crate::application::queries::{GetStore, ListStores};

/// GetStore Handler
pub struct GetStoreHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl GetStoreHandler {
    pub fn new(store_repo: Arc<dyn StoreRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { store_repo, details }
    }

    pub async fn handle(&self, query: GetStore) -> Result<StoreDetails, ApplicationError> {
        let store = self
            .store_repo
            .find_by_id(query.store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", query.store_id))?;

        self.details.store(store).await
    }
}

/// ListStores Handler
pub struct ListStoresHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl ListStoresHandler {
    pub fn new(store_repo: Arc<dyn StoreRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { store_repo, details }
    }

    pub async fn handle(&self, _query: ListStores) -> Result<Vec<StoreDetails>, ApplicationError> {
        let stores = self.store_repo.find_all().await?;

        let mut result = Vec::with_capacity(stores.len());
        for store in stores {
            result.push(self.details.store(store).await?);
        }
        Ok(result)
    }
}
