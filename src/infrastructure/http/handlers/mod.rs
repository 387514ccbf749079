//! HTTP Handlers

mod item;
mod ping;
mod store;
mod tag;
mod user;

pub use item::*;
pub use ping::*;
pub use store::*;
pub use tag::*;
pub use user::*;
