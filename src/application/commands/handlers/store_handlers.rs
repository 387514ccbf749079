//! Store Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateStore, DeleteStore};
use crate::application::error::ApplicationError;
use crate::application::ports::{RepositoryError, StoreRepositoryPort};
use crate::application::queries::handlers::{CatalogDetailsLoader, StoreDetails};

const STORE_NAME_TAKEN: &str = "A store with that name already exists.";

// ============================================================================
// CreateStore
// ============================================================================

pub struct CreateStoreHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl CreateStoreHandler {
    pub fn new(store_repo: Arc<dyn StoreRepositoryPort>, details: CatalogDetailsLoader) -> Self {
        Self { store_repo, details }
    }

    pub async fn handle(&self, command: CreateStore) -> Result<StoreDetails, ApplicationError> {
        if self.store_repo.find_by_name(&command.name).await?.is_some() {
            return Err(ApplicationError::BusinessRuleViolation(STORE_NAME_TAKEN.to_string()));
        }

        // UNIQUE(name) catches a concurrent insert of the same name
        let store = match self.store_repo.create(&command.name).await {
            Ok(store) => store,
            Err(RepositoryError::Duplicate(_)) => {
                return Err(ApplicationError::BusinessRuleViolation(
                    STORE_NAME_TAKEN.to_string(),
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "Store insert failed");
                return Err(ApplicationError::internal(
                    "An error occurred creating the store.",
                ));
            }
        };

        tracing::info!(store_id = store.id, name = %store.name, "Store created");

        self.details.store(store).await
    }
}

// ============================================================================
// DeleteStore
// ============================================================================

pub struct DeleteStoreHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
}

impl DeleteStoreHandler {
    pub fn new(store_repo: Arc<dyn StoreRepositoryPort>) -> Self {
        Self { store_repo }
    }

    pub async fn handle(&self, command: DeleteStore) -> Result<(), ApplicationError> {
        let store = self
            .store_repo
            .find_by_id(command.store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", command.store_id))?;

        self.store_repo.delete(store.id).await?;

        tracing::info!(store_id = store.id, name = %store.name, "Store deleted");

        Ok(())
    }
}
