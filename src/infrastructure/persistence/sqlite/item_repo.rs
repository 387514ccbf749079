//! SQLite Item Repository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::str::FromStr;

use super::{is_unique_violation, DbPool};
use crate::application::ports::{ItemRepositoryPort, RepositoryError};
use crate::domain::catalog::{Item, NewItem};

/// SQLite Item Repository
pub struct SqliteItemRepository {
    pool: DbPool,
}

impl SqliteItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_existing(&self, id: i64) -> Result<Item, RepositoryError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("item {}", id)))
    }
}

#[derive(FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    price: String,
    store_id: i64,
}

impl TryFrom<ItemRow> for Item {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            name: row.name,
            price: Decimal::from_str(&row.price)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            store_id: row.store_id,
        })
    }
}

fn insert_error(e: sqlx::Error) -> RepositoryError {
    if is_unique_violation(&e) {
        RepositoryError::Duplicate(e.to_string())
    } else {
        RepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ItemRepositoryPort for SqliteItemRepository {
    async fn create(&self, item: &NewItem) -> Result<Item, RepositoryError> {
        let result = sqlx::query("INSERT INTO items (name, price, store_id) VALUES (?, ?, ?)")
            .bind(&item.name)
            .bind(item.price.to_string())
            .bind(item.store_id)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            price: item.price,
            store_id: item.store_id,
        })
    }

    async fn insert_with_id(&self, id: i64, item: &NewItem) -> Result<Item, RepositoryError> {
        sqlx::query("INSERT INTO items (id, name, price, store_id) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(&item.name)
            .bind(item.price.to_string())
            .bind(item.store_id)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(Item {
            id,
            name: item.name.clone(),
            price: item.price,
            store_id: item.store_id,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, RepositoryError> {
        let row: Option<ItemRow> =
            sqlx::query_as("SELECT id, name, price, store_id FROM items WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Item::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows: Vec<ItemRow> =
            sqlx::query_as("SELECT id, name, price, store_id FROM items ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Item>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, price, store_id FROM items WHERE store_id = ? ORDER BY id",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn find_by_tag(&self, tag_id: i64) -> Result<Vec<Item>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT i.id, i.name, i.price, i.store_id
            FROM items i
            JOIN item_tags it ON it.item_id = i.id
            WHERE it.tag_id = ?
            ORDER BY i.id
            "#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn update(&self, id: i64, name: &str, price: Decimal) -> Result<Item, RepositoryError> {
        let result = sqlx::query("UPDATE items SET name = ?, price = ? WHERE id = ?")
            .bind(name)
            .bind(price.to_string())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("item {}", id)));
        }

        self.fetch_existing(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM item_tags WHERE item_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("item {}", id)));
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
    use crate::application::ports::{StoreRepositoryPort, TagRepositoryPort};
    use crate::domain::catalog::NewTag;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;

    fn new_item(name: &str, price: &str, store_id: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            price: Decimal::from_str(price).unwrap(),
            store_id,
        }
    }

    #[tokio::test]
    async fn test_price_round_trips_exactly() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();

        let created = repos.item.create(&new_item("Chair", "19.99", store.id)).await.unwrap();
        let found = repos.item.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.price, Decimal::from_str("19.99").unwrap());
        assert_eq!(found.price.to_string(), "19.99");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_with_unknown_store_fails() {
        let repos = Repos::new().await;
        let err = repos.item.create(&new_item("Chair", "1", 404)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_insert_with_taken_id_is_duplicate() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();

        let item = repos
            .item
            .insert_with_id(10, &new_item("Chair", "1.50", store.id))
            .await
            .unwrap();
        assert_eq!(item.id, 10);

        let err = repos
            .item
            .insert_with_id(10, &new_item("Lamp", "2", store.id))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_store() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();
        let item = repos.item.create(&new_item("Chair", "1", store.id)).await.unwrap();

        let updated = repos
            .item
            .update(item.id, "Stool", Decimal::from_str("2.25").unwrap())
            .await
            .unwrap();
        assert_eq!(updated.name, "Stool");
        assert_eq!(updated.store_id, store.id);

        let err = repos.item.update(999, "x", Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_by_store_and_tag() {
        let repos = Repos::new().await;
        let a = repos.store.create("A").await.unwrap();
        let b = repos.store.create("B").await.unwrap();
        let chair = repos.item.create(&new_item("Chair", "1", a.id)).await.unwrap();
        let lamp = repos.item.create(&new_item("Lamp", "2", a.id)).await.unwrap();
        repos.item.create(&new_item("Rug", "3", b.id)).await.unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: "Wood".to_string(), store_id: a.id })
            .await
            .unwrap();
        repos.tag.link(lamp.id, tag.id).await.unwrap();

        let in_a = repos.item.find_by_store(a.id).await.unwrap();
        assert_eq!(in_a, vec![chair, lamp.clone()]);
        assert_eq!(repos.item.find_by_tag(tag.id).await.unwrap(), vec![lamp]);
    }

    #[tokio::test]
    async fn test_delete_removes_links() {
        let repos = Repos::new().await;
        let store = repos.store.create("Corner").await.unwrap();
        let item = repos.item.create(&new_item("Chair", "1", store.id)).await.unwrap();
        let tag = repos
            .tag
            .create(&NewTag { name: "Wood".to_string(), store_id: store.id })
            .await
            .unwrap();
        repos.tag.link(item.id, tag.id).await.unwrap();

        repos.item.delete(item.id).await.unwrap();

        assert!(repos.item.find_by_id(item.id).await.unwrap().is_none());
        assert_eq!(repos.tag.count_items(tag.id).await.unwrap(), 0);
    }
}
