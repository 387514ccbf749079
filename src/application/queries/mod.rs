//! Application Layer - Queries
//!
//! Read side: lookups that never change state

mod item_queries;
mod store_queries;
mod tag_queries;
mod user_queries;

pub mod handlers;

pub use item_queries::*;
pub use store_queries::*;
pub use tag_queries::*;
pub use user_queries::*;
