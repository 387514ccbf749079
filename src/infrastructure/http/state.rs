//! Application State
//!
//! Ports plus every command/query handler, shared across requests

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateItemHandler, CreateStoreHandler, CreateTagHandler, DeleteItemHandler,
    DeleteStoreHandler, DeleteTagHandler, DeleteUserHandler, LinkTagHandler, LoginUserHandler,
    RegisterUserHandler, UnlinkTagHandler, UpsertItemHandler,
    // Query handlers
    CatalogDetailsLoader, GetItemHandler, GetStoreHandler, GetTagHandler, GetUserHandler,
    ListItemsHandler, ListStoreTagsHandler, ListStoresHandler,
    // Ports
    ItemRepositoryPort, PasswordHasherPort, StoreRepositoryPort, TagRepositoryPort,
    TokenServicePort, UserRepositoryPort,
};

/// Repository ports handed to [`AppState::new`]
pub struct Repositories {
    pub stores: Arc<dyn StoreRepositoryPort>,
    pub items: Arc<dyn ItemRepositoryPort>,
    pub tags: Arc<dyn TagRepositoryPort>,
    pub users: Arc<dyn UserRepositoryPort>,
}

pub struct AppState {
    // ========== Ports ==========
    pub tokens: Arc<dyn TokenServicePort>,

    // ========== Command Handlers ==========
    pub create_store_handler: CreateStoreHandler,
    pub delete_store_handler: DeleteStoreHandler,
    pub create_item_handler: CreateItemHandler,
    pub upsert_item_handler: UpsertItemHandler,
    pub delete_item_handler: DeleteItemHandler,
    pub create_tag_handler: CreateTagHandler,
    pub link_tag_handler: LinkTagHandler,
    pub unlink_tag_handler: UnlinkTagHandler,
    pub delete_tag_handler: DeleteTagHandler,
    pub register_user_handler: RegisterUserHandler,
    pub login_user_handler: LoginUserHandler,
    pub delete_user_handler: DeleteUserHandler,

    // ========== Query Handlers ==========
    pub get_store_handler: GetStoreHandler,
    pub list_stores_handler: ListStoresHandler,
    pub get_item_handler: GetItemHandler,
    pub list_items_handler: ListItemsHandler,
    pub get_tag_handler: GetTagHandler,
    pub list_store_tags_handler: ListStoreTagsHandler,
    pub get_user_handler: GetUserHandler,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenServicePort>,
    ) -> Self {
        let Repositories {
            stores,
            items,
            tags,
            users,
        } = repos;
        let details = CatalogDetailsLoader::new(stores.clone(), items.clone(), tags.clone());

        Self {
            tokens: tokens.clone(),

            // Command handlers
            create_store_handler: CreateStoreHandler::new(stores.clone(), details.clone()),
            delete_store_handler: DeleteStoreHandler::new(stores.clone()),
            create_item_handler: CreateItemHandler::new(
                stores.clone(),
                items.clone(),
                details.clone(),
            ),
            upsert_item_handler: UpsertItemHandler::new(
                stores.clone(),
                items.clone(),
                details.clone(),
            ),
            delete_item_handler: DeleteItemHandler::new(items.clone()),
            create_tag_handler: CreateTagHandler::new(stores.clone(), tags.clone(), details.clone()),
            link_tag_handler: LinkTagHandler::new(items.clone(), tags.clone(), details.clone()),
            unlink_tag_handler: UnlinkTagHandler::new(items.clone(), tags.clone(), details.clone()),
            delete_tag_handler: DeleteTagHandler::new(tags.clone()),
            register_user_handler: RegisterUserHandler::new(users.clone(), hasher.clone()),
            login_user_handler: LoginUserHandler::new(users.clone(), hasher, tokens),
            delete_user_handler: DeleteUserHandler::new(users.clone()),

            // Query handlers
            get_store_handler: GetStoreHandler::new(stores.clone(), details.clone()),
            list_stores_handler: ListStoresHandler::new(stores.clone(), details.clone()),
            get_item_handler: GetItemHandler::new(items.clone(), details.clone()),
            list_items_handler: ListItemsHandler::new(items, details.clone()),
            get_tag_handler: GetTagHandler::new(tags.clone(), details.clone()),
            list_store_tags_handler: ListStoreTagsHandler::new(stores, tags, details),
            get_user_handler: GetUserHandler::new(users),
        }
    }
}
