//! Item Commands

use rust_decimal::Decimal;

use crate::domain::catalog::NewItem;

/// Create an item in an existing store
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub item: NewItem,
}

/// Replace name and price of an item, or create it under `item_id` when absent.
///
/// `store_id` is only read on the create path.
#[derive(Debug, Clone)]
pub struct UpsertItem {
    pub item_id: i64,
    pub name: String,
    pub price: Decimal,
    pub store_id: Option<i64>,
}

/// Delete an item
#[derive(Debug, Clone)]
pub struct DeleteItem {
    pub item_id: i64,
}
