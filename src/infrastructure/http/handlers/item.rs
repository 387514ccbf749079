//! Item HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::{CreateItem, DeleteItem, GetItem, ListItems, UpsertItem};
use crate::infrastructure::http::dto::{ItemSchema, ItemUpdateSchema, ValidatedJson};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::IdPath;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::views::{ItemView, MessageView};

/// GET /item
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    let items = state.list_items_handler.handle(ListItems).await?;
    Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

/// POST /item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<ItemSchema>,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    let item = state
        .create_item_handler
        .handle(CreateItem { item: payload.into() })
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /item/{id}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    IdPath(item_id): IdPath<i64>,
) -> Result<Json<ItemView>, ApiError> {
    let item = state.get_item_handler.handle(GetItem { item_id }).await?;
    Ok(Json(item.into()))
}

/// PUT /item/{id} - replace name and price, or create the item under this id
pub async fn put_item(
    State(state): State<Arc<AppState>>,
    IdPath(item_id): IdPath<i64>,
    ValidatedJson(payload): ValidatedJson<ItemUpdateSchema>,
) -> Result<Json<ItemView>, ApiError> {
    let command = UpsertItem {
        item_id,
        name: payload.name,
        price: payload.price,
        store_id: payload.store_id,
    };
    let item = state.upsert_item_handler.handle(command).await?;
    Ok(Json(item.into()))
}

/// DELETE /item/{id}
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    IdPath(item_id): IdPath<i64>,
) -> Result<Json<MessageView>, ApiError> {
    state.delete_item_handler.handle(DeleteItem { item_id }).await?;
    Ok(Json(MessageView::new("Item deleted.")))
}
