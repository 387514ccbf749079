//! Store Queries

/// Fetch one store with its items and tags
#[derive(Debug, Clone)]
pub struct GetStore {
    pub store_id: i64,
}

/// List all stores
#[derive(Debug, Clone)]
pub struct ListStores;
