//! Domain Layer
//!
//! Two bounded contexts:
//! - Catalog: stores, items, tags and the item/tag association
//! - User: registered accounts

pub mod catalog;
pub mod user;
