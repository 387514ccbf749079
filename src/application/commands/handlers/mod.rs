//! Command Handlers

mod item_handlers;
mod store_handlers;
mod tag_handlers;
mod user_handlers;

pub use item_handlers::*;
pub use store_handlers::*;
pub use tag_handlers::*;
pub use user_handlers::*;
