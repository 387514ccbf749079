//! Response views
//!
//! Relations nest one level only. Passwords appear in no view.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::{ItemDetails, StoreDetails, TagDetails, UnlinkTagResponse};
use crate::domain::catalog::{Item, Store, Tag};
use crate::domain::user::User;

#[derive(Debug, Serialize)]
pub struct PlainStore {
    pub id: i64,
    pub name: String,
}

impl From<Store> for PlainStore {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlainItem {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<Item> for PlainItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlainTag {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for PlainTag {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreView {
    pub id: i64,
    pub name: String,
    pub items: Vec<PlainItem>,
    pub tags: Vec<PlainTag>,
}

impl From<StoreDetails> for StoreView {
    fn from(details: StoreDetails) -> Self {
        Self {
            id: details.store.id,
            name: details.store.name,
            items: details.items.into_iter().map(PlainItem::from).collect(),
            tags: details.tags.into_iter().map(PlainTag::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub store_id: i64,
    pub store: PlainStore,
    pub tags: Vec<PlainTag>,
}

impl From<ItemDetails> for ItemView {
    fn from(details: ItemDetails) -> Self {
        Self {
            id: details.item.id,
            name: details.item.name,
            price: details.item.price,
            store_id: details.item.store_id,
            store: details.store.into(),
            tags: details.tags.into_iter().map(PlainTag::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub store_id: i64,
    pub store: PlainStore,
    pub items: Vec<PlainItem>,
}

impl From<TagDetails> for TagView {
    fn from(details: TagDetails) -> Self {
        Self {
            id: details.tag.id,
            name: details.tag.name,
            store_id: details.tag.store_id,
            store: details.store.into(),
            items: details.items.into_iter().map(PlainItem::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagAndItemView {
    pub message: &'static str,
    pub item: ItemView,
    pub tag: TagView,
}

impl From<UnlinkTagResponse> for TagAndItemView {
    fn from(response: UnlinkTagResponse) -> Self {
        Self {
            message: "Item removed from tag",
            item: response.item.into(),
            tag: response.tag.into(),
        }
    }
}

/// `{"message": ...}` confirmation body
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub message: &'static str,
}

impl MessageView {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenView {
    pub access_token: String,
}
