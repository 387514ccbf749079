//! User Context

mod entities;

pub use entities::{Credentials, User};
