//! SQLite Store Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{is_unique_violation, DbPool};
use crate::application::ports::{RepositoryError, StoreRepositoryPort};
use crate::domain::catalog::Store;

/// SQLite Store Repository
pub struct SqliteStoreRepository {
    pool: DbPool,
}

impl SqliteStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StoreRow {
    id: i64,
    name: String,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl StoreRepositoryPort for SqliteStoreRepository {
    async fn create(&self, name: &str) -> Result<Store, RepositoryError> {
        let result = sqlx::query("INSERT INTO stores (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepositoryError::Duplicate(format!("store name '{}'", name))
                } else {
                    RepositoryError::DatabaseError(e.to_string())
                }
            })?;

        Ok(Store {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, RepositoryError> {
        let row: Option<StoreRow> = sqlx::query_as("SELECT id, name FROM stores WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Store::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Store>, RepositoryError> {
        let row: Option<StoreRow> = sqlx::query_as("SELECT id, name FROM stores WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Store::from))
    }

    async fn find_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as("SELECT id, name FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // links touching the store's items or tags
        sqlx::query(
            r#"
            DELETE FROM item_tags
            WHERE item_id IN (SELECT id FROM items WHERE store_id = ?)
               OR tag_id IN (SELECT id FROM tags WHERE store_id = ?)
            "#,
        )
        .bind(id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM items WHERE store_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM tags WHERE store_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM stores WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("store {}", id)));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;

    #[tokio::test]
    async fn test_create_and_find() {
        let repos = Repos::new().await;
        let created = repos.store.create("Corner").await.unwrap();

        let found = repos.store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(repos.store.find_by_name("Corner").await.unwrap(), Some(created));
        assert!(repos.store.find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let repos = Repos::new().await;
        repos.store.create("Corner").await.unwrap();

        let err = repos.store.create("Corner").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repos = Repos::new().await;
        let a = repos.store.create("A").await.unwrap();
        let b = repos.store.create("B").await.unwrap();

        let all = repos.store.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_delete_missing_store() {
        let repos = Repos::new().await;
        let err = repos.store.delete(1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
