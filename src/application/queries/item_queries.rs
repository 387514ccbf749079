//! Item Queries

/// Fetch one item with its store and tags
#[derive(Debug, Clone)]
pub struct GetItem {
    pub item_id: i64,
}

/// List all items
#[derive(Debug, Clone)]
pub struct ListItems;
