//! Item Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateItem, DeleteItem, UpsertItem};
use crate::application::error::ApplicationError;
use crate::application::ports::{ItemRepositoryPort, RepositoryError, StoreRepositoryPort};
use crate::application::queries::handlers::{CatalogDetailsLoader, ItemDetails};
use crate::domain::catalog::NewItem;

// ============================================================================
// CreateItem
// ============================================================================

pub struct CreateItemHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    item_repo: Arc<dyn ItemRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl CreateItemHandler {
    pub fn new(
        store_repo: Arc<dyn StoreRepositoryPort>,
        item_repo: Arc<dyn ItemRepositoryPort>,
        details: CatalogDetailsLoader,
    ) -> Self {
        Self {
            store_repo,
            item_repo,
            details,
        }
    }

    pub async fn handle(&self, command: CreateItem) -> Result<ItemDetails, ApplicationError> {
        let store_id = command.item.store_id;
        self.store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", store_id))?;

        let item = self.item_repo.create(&command.item).await.map_err(|e| {
            tracing::error!(error = %e, store_id, "Item insert failed");
            ApplicationError::internal("An error occurred while inserting the item.")
        })?;

        tracing::info!(item_id = item.id, store_id, name = %item.name, "Item created");

        self.details.item(item).await
    }
}

// ============================================================================
// UpsertItem
// ============================================================================

/// Replace-or-create for PUT /item/{id}.
///
/// Two racing requests on an absent id are resolved last-writer-wins: the
/// loser of the insert falls back to an update.
pub struct UpsertItemHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    item_repo: Arc<dyn ItemRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl UpsertItemHandler {
    pub fn new(
        store_repo: Arc<dyn StoreRepositoryPort>,
        item_repo: Arc<dyn ItemRepositoryPort>,
        details: CatalogDetailsLoader,
    ) -> Self {
        Self {
            store_repo,
            item_repo,
            details,
        }
    }

    pub async fn handle(&self, command: UpsertItem) -> Result<ItemDetails, ApplicationError> {
        let UpsertItem {
            item_id,
            name,
            price,
            store_id,
        } = command;

        let item = match self.item_repo.find_by_id(item_id).await? {
            Some(_) => {
                let item = self.item_repo.update(item_id, &name, price).await?;
                tracing::info!(item_id, "Item replaced");
                item
            }
            None => {
                let store_id = store_id.ok_or(ApplicationError::MissingField("store_id"))?;
                self.store_repo
                    .find_by_id(store_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Store", store_id))?;

                let new_item = NewItem {
                    name: name.clone(),
                    price,
                    store_id,
                };
                match self.item_repo.insert_with_id(item_id, &new_item).await {
                    Ok(item) => {
                        tracing::info!(item_id, store_id, "Item created through upsert");
                        item
                    }
                    Err(RepositoryError::Duplicate(_)) => {
                        tracing::warn!(item_id, "Concurrent upsert, replacing instead");
                        self.item_repo.update(item_id, &name, price).await?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        self.details.item(item).await
    }
}

// ============================================================================
// DeleteItem
// ============================================================================

pub struct DeleteItemHandler {
    item_repo: Arc<dyn ItemRepositoryPort>,
}

impl DeleteItemHandler {
    pub fn new(item_repo: Arc<dyn ItemRepositoryPort>) -> Self {
        Self { item_repo }
    }

    pub async fn handle(&self, command: DeleteItem) -> Result<(), ApplicationError> {
        let item = self
            .item_repo
            .find_by_id(command.item_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Item", command.item_id))?;

        self.item_repo.delete(item.id).await?;

        tracing::info!(item_id = item.id, "Item deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TagRepositoryPort;
    use crate::domain::catalog::NewTag;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;
    use rust_decimal::Decimal;

    fn upsert_handler(repos: &Repos) -> UpsertItemHandler {
        UpsertItemHandler::new(repos.store.clone(), repos.item.clone(), repos.details())
    }

    #[tokio::test]
    async fn test_create_item_requires_existing_store() {
        let repos = Repos::new().await;
        let handler =
            CreateItemHandler::new(repos.store.clone(), repos.item.clone(), repos.details());

        let err = handler
            .handle(CreateItem {
                item: NewItem {
                    name: "Chair".to_string(),
                    price: Decimal::new(1599, 2),
                    store_id: 42,
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Store", id: 42 }));
    }

    #[tokio::test]
    async fn test_upsert_creates_with_given_id() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();

        let details = upsert_handler(&repos)
            .handle(UpsertItem {
                item_id: 77,
                name: "Lamp".to_string(),
                price: Decimal::new(2050, 2),
                store_id: Some(store.id),
            })
            .await
            .unwrap();

        assert_eq!(details.item.id, 77);
        assert_eq!(details.store.id, store.id);
        assert!(repos.item.find_by_id(77).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upsert_without_store_on_create_path_fails() {
        let repos = Repos::new().await;

        let err = upsert_handler(&repos)
            .handle(UpsertItem {
                item_id: 5,
                name: "Lamp".to_string(),
                price: Decimal::new(2050, 2),
                store_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MissingField("store_id")));
    }

    #[tokio::test]
    async fn test_upsert_replaces_only_name_and_price() {
        let repos = Repos::new().await;
        let first = repos.store.create("First").await.unwrap();
        let second = repos.store.create("Second").await.unwrap();
        let item = repos
            .item
            .create(&NewItem {
                name: "Chair".to_string(),
                price: Decimal::new(1599, 2),
                store_id: first.id,
            })
            .await
            .unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: "Wood".to_string(), store_id: first.id })
            .await
            .unwrap();
        repos.tag.link(item.id, tag.id).await.unwrap();

        let details = upsert_handler(&repos)
            .handle(UpsertItem {
                item_id: item.id,
                name: "Stool".to_string(),
                price: Decimal::new(999, 2),
                store_id: Some(second.id),
            })
            .await
            .unwrap();

        assert_eq!(details.item.name, "Stool");
        assert_eq!(details.item.price, Decimal::new(999, 2));
        assert_eq!(details.item.store_id, first.id);
        assert_eq!(details.tags.len(), 1);
        assert_eq!(details.tags[0].id, tag.id);
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let repos = Repos::new().await;
        let err = DeleteItemHandler::new(repos.item.clone())
            .handle(DeleteItem { item_id: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Item", id: 1 }));
    }
}
