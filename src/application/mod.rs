//! Application layer - use case orchestration
//!
//! - ports: repository and credential interfaces
//! - commands: write-side commands and their handlers
//! - queries: read-side queries and their handlers
//! - error: application errors

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        CreateItemHandler, CreateStoreHandler, CreateTagHandler, DeleteItemHandler,
        DeleteStoreHandler, DeleteTagHandler, DeleteUserHandler, LinkTagHandler, LoginResponse,
        LoginUserHandler, RegisterUserHandler, UnlinkTagHandler, UnlinkTagResponse,
        UpsertItemHandler,
    },
    CreateItem, CreateStore, CreateTag, DeleteItem, DeleteStore, DeleteTag, DeleteUser, LinkTag,
    LoginUser, RegisterUser, UnlinkTag, UpsertItem,
};

pub use error::ApplicationError;

pub use ports::{
    ItemRepositoryPort, PasswordHashError, PasswordHasherPort, RepositoryError,
    StoreRepositoryPort, TagRepositoryPort, TokenError, TokenIdentity, TokenServicePort,
    UserRepositoryPort,
};

pub use queries::{
    handlers::{
        CatalogDetailsLoader, GetItemHandler, GetStoreHandler, GetTagHandler, GetUserHandler,
        ItemDetails, ListItemsHandler, ListStoreTagsHandler, ListStoresHandler, StoreDetails,
        TagDetails,
    },
    GetItem, GetStore, GetTag, GetUser, ListItems, ListStoreTags, ListStores,
};
