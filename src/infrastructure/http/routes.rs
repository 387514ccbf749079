//! HTTP Routes
//!
//! API Endpoints (* = bearer token required):
//! - /ping                      GET          liveness probe
//! - /store                     GET, POST*   list / create stores
//! - /store/:id                 GET, DELETE* fetch / delete (cascading) a store
//! - /store/:id/tag             GET, POST*   list / create tags of a store
//! - /item                      GET, POST*   list / create items
//! - /item/:id                  GET, PUT*, DELETE*
//! - /item/:id/tag/:tag_id      POST*, DELETE*  link / unlink a tag
//! - /tag/:id                   GET, DELETE*
//! - /register, /login          POST
//! - /user/:id                  GET, DELETE*

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use super::auth::require_auth;
use super::extract::route_not_found;
use super::handlers;
use super::state::AppState;

/// Build every route. The state is needed up front for the auth layer.
pub fn create_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = protected_routes().route_layer(middleware::from_fn_with_state(
        state.tokens.clone(),
        require_auth,
    ));

    public_routes()
        .merge(protected)
        .fallback(route_not_found)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/store", get(handlers::list_stores))
        .route("/store/:id", get(handlers::get_store))
        .route("/store/:id/tag", get(handlers::list_store_tags))
        .route("/item", get(handlers::list_items))
        .route("/item/:id", get(handlers::get_item))
        .route("/tag/:id", get(handlers::get_tag))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/user/:id", get(handlers::get_user))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/store", post(handlers::create_store))
        .route("/store/:id", delete(handlers::delete_store))
        .route("/store/:id/tag", post(handlers::create_tag))
        .route("/item", post(handlers::create_item))
        .route(
            "/item/:id",
            put(handlers::put_item).delete(handlers::delete_item),
        )
        .route(
            "/item/:id/tag/:tag_id",
            post(handlers::link_tag).delete(handlers::unlink_tag),
        )
        .route("/tag/:id", delete(handlers::delete_tag))
        .route("/user/:id", delete(handlers::delete_user))
}
