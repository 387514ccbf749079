//! Tag Commands

/// Create a tag inside a store
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub store_id: i64,
    pub name: String,
}

/// Attach a tag to an item
#[derive(Debug, Clone)]
pub struct LinkTag {
    pub item_id: i64,
    pub tag_id: i64,
}

/// Detach a tag from an item
#[derive(Debug, Clone)]
pub struct UnlinkTag {
    pub item_id: i64,
    pub tag_id: i64,
}

/// Delete a tag that no item uses
#[derive(Debug, Clone)]
pub struct DeleteTag {
    pub tag_id: i64,
}
