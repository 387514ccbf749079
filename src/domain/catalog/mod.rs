//! Catalog Context
//!
//! Responsibilities:
//! - Store / Item / Tag entities
//! - Linking rules between items and tags

mod entities;
mod errors;

pub use entities::{Item, NewItem, NewTag, Store, Tag};
pub use errors::CatalogError;
