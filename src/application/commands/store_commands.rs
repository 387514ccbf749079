//! Store Commands

/// Create a store
#[derive(Debug, Clone)]
pub struct CreateStore {
    pub name: String,
}

/// Delete a store with everything it owns
#[derive(Debug, Clone)]
pub struct DeleteStore {
    pub store_id: i64,
}
