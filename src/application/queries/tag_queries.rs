//! Tag Queries

/// Fetch one tag with its store and items
#[derive(Debug, Clone)]
pub struct GetTag {
    pub tag_id: i64,
}

/// List the tags of a store
#[derive(Debug, Clone)]
pub struct ListStoreTags {
    pub store_id: i64,
}
