//! SQLite Tag Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, TagRepositoryPort};
use crate::domain::catalog::{NewTag, Tag};

/// SQLite Tag Repository
pub struct SqliteTagRepository {
    pool: DbPool,
}

impl SqliteTagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TagRow {
    id: i64,
    name: String,
    store_id: i64,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            store_id: row.store_id,
        }
    }
}

#[async_trait]
impl TagRepositoryPort for SqliteTagRepository {
    async fn create(&self, tag: &NewTag) -> Result<Tag, RepositoryError> {
        let result = sqlx::query("INSERT INTO tags (name, store_id) VALUES (?, ?)")
            .bind(&tag.name)
            .bind(tag.store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            name: tag.name.clone(),
            store_id: tag.store_id,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepositoryError> {
        let row: Option<TagRow> = sqlx::query_as("SELECT id, name, store_id FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Tag::from))
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Tag>, RepositoryError> {
        let rows: Vec<TagRow> =
            sqlx::query_as("SELECT id, name, store_id FROM tags WHERE store_id = ? ORDER BY id")
                .bind(store_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn find_by_item(&self, item_id: i64) -> Result<Vec<Tag>, RepositoryError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.store_id
            FROM tags t
            JOIN item_tags it ON it.tag_id = t.id
            WHERE it.item_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn count_items(&self, tag_id: i64) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM item_tags WHERE tag_id = ?")
            .bind(tag_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count)
    }

    async fn is_linked(&self, item_id: i64, tag_id: i64) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM item_tags WHERE item_id = ? AND tag_id = ?")
                .bind(item_id)
                .bind(tag_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn link(&self, item_id: i64, tag_id: i64) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO item_tags (item_id, tag_id) VALUES (?, ?)")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn unlink(&self, item_id: i64, tag_id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM item_tags WHERE item_id = ? AND tag_id = ?")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("tag {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ItemRepositoryPort, StoreRepositoryPort};
    use crate::domain::catalog::NewItem;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_link_lifecycle() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();
        let item = repos
            .item
            .create(&NewItem { name: "Chair".to_string(), price: Decimal::ONE, store_id: store.id })
            .await
            .unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: "Wood".to_string(), store_id: store.id })
            .await
            .unwrap();

        assert!(!repos.tag.is_linked(item.id, tag.id).await.unwrap());

        repos.tag.link(item.id, tag.id).await.unwrap();
        repos.tag.link(item.id, tag.id).await.unwrap();
        assert!(repos.tag.is_linked(item.id, tag.id).await.unwrap());
        assert_eq!(repos.tag.count_items(tag.id).await.unwrap(), 1);
        assert_eq!(repos.tag.find_by_item(item.id).await.unwrap(), vec![tag.clone()]);

        assert!(repos.tag.unlink(item.id, tag.id).await.unwrap());
        assert!(!repos.tag.unlink(item.id, tag.id).await.unwrap());
        assert!(repos.tag.find_by_item(item.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_name_allowed_in_store() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();
        let new_tag = NewTag { name: "Sale".to_string(), store_id: store.id };

        let first = repos.tag.create(&new_tag).await.unwrap();
        let second = repos.tag.create(&new_tag).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repos.tag.find_by_store(store.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: "Sale".to_string(), store_id: store.id })
            .await
            .unwrap();

        repos.tag.delete(tag.id).await.unwrap();
        assert!(repos.tag.find_by_id(tag.id).await.unwrap().is_none());
        assert!(matches!(
            repos.tag.delete(tag.id).await.unwrap_err(),
            RepositoryError::NotFound(_)
        ));
    }
}
