//! Tag Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateTag, DeleteTag, LinkTag, UnlinkTag};
use crate::application::error::ApplicationError;
use crate::application::ports::{ItemRepositoryPort, StoreRepositoryPort, TagRepositoryPort};
use crate::application::queries::handlers::{CatalogDetailsLoader, ItemDetails, TagDetails};
use crate::domain::catalog::{Item, NewTag, Tag};

// ============================================================================
// CreateTag
// ============================================================================

pub struct CreateTagHandler {
    store_repo: Arc<dyn StoreRepositoryPort>,
    tag_repo: Arc<dyn TagRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl CreateTagHandler {
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

    /// Tag names are not unique within a store.
    pub async fn handle(&self, command: CreateTag) -> Result<TagDetails, ApplicationError> {
        let store_id = command.store_id;
        self.store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Store", store_id))?;

        let tag = self
            .tag_repo
            .create(&NewTag {
                name: command.name,
                store_id,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, store_id, "Tag insert failed");
                ApplicationError::internal("An error occurred while inserting the tag.")
            })?;

        tracing::info!(tag_id = tag.id, store_id, name = %tag.name, "Tag created");

        self.details.tag(tag).await
    }
}

// ============================================================================
// LinkTag / UnlinkTag
// ============================================================================

async fn load_pair(
    item_repo: &dyn ItemRepositoryPort,
    tag_repo: &dyn TagRepositoryPort,
    item_id: i64,
    tag_id: i64,
) -> Result<(Item, Tag), ApplicationError> {
    let item = item_repo
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Item", item_id))?;
    let tag = tag_repo
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Tag", tag_id))?;
    Ok((item, tag))
}

pub struct LinkTagHandler {
    item_repo: Arc<dyn ItemRepositoryPort>,
    tag_repo: Arc<dyn TagRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl LinkTagHandler {
    pub fn new(
        item_repo: Arc<dyn ItemRepositoryPort>,
        tag_repo: Arc<dyn TagRepositoryPort>,
        details: CatalogDetailsLoader,
    ) -> Self {
        Self {
            item_repo,
            tag_repo,
            details,
        }
    }

    pub async fn handle(&self, command: LinkTag) -> Result<TagDetails, ApplicationError> {
        let (item, tag) =
            load_pair(&*self.item_repo, &*self.tag_repo, command.item_id, command.tag_id).await?;

        tag.ensure_linkable_to(&item)?;

        self.tag_repo.link(item.id, tag.id).await?;

        tracing::info!(item_id = item.id, tag_id = tag.id, "Tag linked to item");

        self.details.tag(tag).await
    }
}

/// Result of detaching a tag, both sides reloaded after the change
#[derive(Debug, Clone)]
pub struct UnlinkTagResponse {
    pub item: ItemDetails,
    pub tag: TagDetails,
}

pub struct UnlinkTagHandler {
    item_repo: Arc<dyn ItemRepositoryPort>,
    tag_repo: Arc<dyn TagRepositoryPort>,
    details: CatalogDetailsLoader,
}

impl UnlinkTagHandler {
    pub fn new(
        item_repo: Arc<dyn ItemRepositoryPort>,
        tag_repo: Arc<dyn TagRepositoryPort>,
        details: CatalogDetailsLoader,
    ) -> Self {
        Self {
            item_repo,
            tag_repo,
            details,
        }
    }

    pub async fn handle(&self, command: UnlinkTag) -> Result<UnlinkTagResponse, ApplicationError> {
        let (item, tag) =
            load_pair(&*self.item_repo, &*self.tag_repo, command.item_id, command.tag_id).await?;

        let link_missing = ApplicationError::LinkNotFound {
            item_id: item.id,
            tag_id: tag.id,
        };
        if !self.tag_repo.is_linked(item.id, tag.id).await? {
            return Err(link_missing);
        }
        // a concurrent unlink may still win between the check and the delete
        if !self.tag_repo.unlink(item.id, tag.id).await? {
            return Err(link_missing);
        }

        tracing::info!(item_id = item.id, tag_id = tag.id, "Tag unlinked from item");

        Ok(UnlinkTagResponse {
            item: self.details.item(item).await?,
            tag: self.details.tag(tag).await?,
        })
    }
}

// ============================================================================
// DeleteTag
// ============================================================================

pub struct DeleteTagHandler {
    tag_repo: Arc<dyn TagRepositoryPort>,
}

impl DeleteTagHandler {
    pub fn new(tag_repo: Arc<dyn TagRepositoryPort>) -> Self {
        Self { tag_repo }
    }

    pub async fn handle(&self, command: DeleteTag) -> Result<(), ApplicationError> {
        let tag = self
            .tag_repo
            .find_by_id(command.tag_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Tag", command.tag_id))?;

        let linked_items = self.tag_repo.count_items(tag.id).await?;
        tag.ensure_deletable(linked_items)?;

        self.tag_repo.delete(tag.id).await?;

        tracing::info!(tag_id = tag.id, "Tag deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::NewItem;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;
    use rust_decimal::Decimal;

    async fn seed(repos: &Repos, store_name: &str) -> (Item, Tag) {
        let store = repos.store.create(store_name).await.unwrap();
        let item = repos
            .item
            .create(&NewItem {
                name: format!("{} item", store_name),
                price: Decimal::new(100, 2),
                store_id: store.id,
            })
            .await
            .unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: format!("{} tag", store_name), store_id: store.id })
            .await
            .unwrap();
        (item, tag)
    }

    fn link_handler(repos: &Repos) -> LinkTagHandler {
        LinkTagHandler::new(repos.item.clone(), repos.tag.clone(), repos.details())
    }

    #[tokio::test]
    async fn test_link_across_stores_fails_both_ways() {
        let repos = Repos::new().await;
        let (item_a, tag_a) = seed(&repos, "A").await;
        let (item_b, tag_b) = seed(&repos, "B").await;
        let handler = link_handler(&repos);

        for (item, tag) in [(&item_a, &tag_b), (&item_b, &tag_a)] {
            let err = handler
                .handle(LinkTag { item_id: item.id, tag_id: tag.id })
                .await
                .unwrap_err();
            assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
        }
        assert_eq!(repos.tag.count_items(tag_a.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_link_returns_tag_with_item() {
        let repos = Repos::new().await;
        let (item, tag) = seed(&repos, "A").await;

        let details = link_handler(&repos)
            .handle(LinkTag { item_id: item.id, tag_id: tag.id })
            .await
            .unwrap();
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].id, item.id);

        // linking twice stays a single association
        link_handler(&repos)
            .handle(LinkTag { item_id: item.id, tag_id: tag.id })
            .await
            .unwrap();
        assert_eq!(repos.tag.count_items(tag.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unlink_missing_link_is_rejected() {
        let repos = Repos::new().await;
        let (item, tag) = seed(&repos, "A").await;
        let handler = UnlinkTagHandler::new(repos.item.clone(), repos.tag.clone(), repos.details());

        let err = handler
            .handle(UnlinkTag { item_id: item.id, tag_id: tag.id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::LinkNotFound { .. }));

        repos.tag.link(item.id, tag.id).await.unwrap();
        let response = handler
            .handle(UnlinkTag { item_id: item.id, tag_id: tag.id })
            .await
            .unwrap();
        assert!(response.item.tags.is_empty());
        assert!(response.tag.items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_tag_in_use() {
        let repos = Repos::new().await;
        let (item, tag) = seed(&repos, "A").await;
        repos.tag.link(item.id, tag.id).await.unwrap();
        let handler = DeleteTagHandler::new(repos.tag.clone());

        let err = handler.handle(DeleteTag { tag_id: tag.id }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));

        repos.tag.unlink(item.id, tag.id).await.unwrap();
        handler.handle(DeleteTag { tag_id: tag.id }).await.unwrap();
        assert!(repos.tag.find_by_id(tag.id).await.unwrap().is_none());
    }
}
