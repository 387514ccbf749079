//! Application Layer - Commands
//!
//! Write side: every state change goes through one of these

mod item_commands;
mod store_commands;
mod tag_commands;
mod user_commands;

pub mod handlers;

pub use item_commands::*;
pub use store_commands::*;
pub use tag_commands::*;
pub use user_commands::*;
