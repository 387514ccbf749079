//! Application Ports
//!
//! Outbound interfaces between the application and infrastructure layers

mod credentials;
mod repositories;

pub use credentials::{
    PasswordHashError, PasswordHasherPort, TokenError, TokenIdentity, TokenServicePort,
};
pub use repositories::{
    ItemRepositoryPort, RepositoryError, StoreRepositoryPort, TagRepositoryPort,
    UserRepositoryPort,
};
