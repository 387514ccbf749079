//! Store HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::{CreateStore, DeleteStore, GetStore, ListStores};
use crate::infrastructure::http::dto::{StoreSchema, ValidatedJson};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::IdPath;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::views::{MessageView, StoreView};

/// GET /store
pub async fn list_stores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoreView>>, ApiError> {
    let stores = state.list_stores_handler.handle(ListStores).await?;
    Ok(Json(stores.into_iter().map(StoreView::from).collect()))
}

/// POST /store
pub async fn create_store(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<StoreSchema>,
) -> Result<(StatusCode, Json<StoreView>), ApiError> {
    let store = state
        .create_store_handler
        .handle(CreateStore { name: payload.name })
        .await?;
    Ok((StatusCode::CREATED, Json(store.into())))
}

/// GET /store/{id}
pub async fn get_store(
    State(state): State<Arc<AppState>>,
    IdPath(store_id): IdPath<i64>,
) -> Result<Json<StoreView>, ApiError> {
    let store = state.get_store_handler.handle(GetStore { store_id }).await?;
    Ok(Json(store.into()))
}

/// DELETE /store/{id}
pub async fn delete_store(
    State(state): State<Arc<AppState>>,
    IdPath(store_id): IdPath<i64>,
) -> Result<Json<MessageView>, ApiError> {
    state
        .delete_store_handler
        .handle(DeleteStore { store_id })
        .await?;
    Ok(Json(MessageView::new("Store deleted.")))
}
