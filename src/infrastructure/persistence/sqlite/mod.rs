//! SQLite Persistence

mod database;
mod item_repo;
mod store_repo;
mod tag_repo;
mod user_repo;

pub use database::*;
pub use item_repo::*;
pub use store_repo::*;
pub use tag_repo::*;
pub use user_repo::*;

#[cfg(test)]
pub mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{
        ItemRepositoryPort, StoreRepositoryPort, TagRepositoryPort, UserRepositoryPort,
    };
    use crate::application::queries::handlers::CatalogDetailsLoader;

    /// All repositories over one fresh in-memory database
    pub struct Repos {
        pub pool: DbPool,
        pub store: Arc<dyn StoreRepositoryPort>,
        pub item: Arc<dyn ItemRepositoryPort>,
        pub tag: Arc<dyn TagRepositoryPort>,
        pub user: Arc<dyn UserRepositoryPort>,
    }

    impl Repos {
        pub async fn new() -> Self {
            let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
            run_migrations(&pool).await.unwrap();

            Self {
                store: Arc::new(SqliteStoreRepository::new(pool.clone())),
                item: Arc::new(SqliteItemRepository::new(pool.clone())),
                tag: Arc::new(SqliteTagRepository::new(pool.clone())),
                user: Arc::new(SqliteUserRepository::new(pool.clone())),
                pool,
            }
        }

        pub fn details(&self) -> CatalogDetailsLoader {
            CatalogDetailsLoader::new(self.store.clone(), self.item.clone(), self.tag.clone())
        }
    }
}
