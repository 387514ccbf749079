//! Tag HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::{CreateTag, DeleteTag, GetTag, LinkTag, ListStoreTags, UnlinkTag};
use crate::infrastructure::http::dto::{TagSchema, ValidatedJson};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::IdPath;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::views::{MessageView, TagAndItemView, TagView};

/// GET /store/{id}/tag
pub async fn list_store_tags(
    State(state): State<Arc<AppState>>,
    IdPath(store_id): IdPath<i64>,
) -> Result<Json<Vec<TagView>>, ApiError> {
    let tags = state
        .list_store_tags_handler
        .handle(ListStoreTags { store_id })
        .await?;
    Ok(Json(tags.into_iter().map(TagView::from).collect()))
}

/// POST /store/{id}/tag
pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    IdPath(store_id): IdPath<i64>,
    ValidatedJson(payload): ValidatedJson<TagSchema>,
) -> Result<(StatusCode, Json<TagView>), ApiError> {
    let tag = state
        .create_tag_handler
        .handle(CreateTag {
            store_id,
            name: payload.name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// POST /item/{id}/tag/{tag_id}
pub async fn link_tag(
    State(state): State<Arc<AppState>>,
    IdPath((item_id, tag_id)): IdPath<(i64, i64)>,
) -> Result<(StatusCode, Json<TagView>), ApiError> {
    let tag = state
        .link_tag_handler
        .handle(LinkTag { item_id, tag_id })
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// DELETE /item/{id}/tag/{tag_id}
pub async fn unlink_tag(
    State(state): State<Arc<AppState>>,
    IdPath((item_id, tag_id)): IdPath<(i64, i64)>,
) -> Result<Json<TagAndItemView>, ApiError> {
    let result = state
        .unlink_tag_handler
        .handle(UnlinkTag { item_id, tag_id })
        .await?;
    Ok(Json(result.into()))
}

/// GET /tag/{id}
pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    IdPath(tag_id): IdPath<i64>,
) -> Result<Json<TagView>, ApiError> {
    let tag = state.get_tag_handler.handle(GetTag { tag_id }).await?;
    Ok(Json(tag.into()))
}

/// DELETE /tag/{id} - only tags without items can go
pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    IdPath(tag_id): IdPath<i64>,
) -> Result<(StatusCode, Json<MessageView>), ApiError> {
    state.delete_tag_handler.handle(DeleteTag { tag_id }).await?;
    Ok((StatusCode::ACCEPTED, Json(MessageView::new("Tag deleted"))))
}
