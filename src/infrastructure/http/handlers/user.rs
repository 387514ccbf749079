//! User HTTP Handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

use crate::application::{DeleteUser, GetUser, LoginUser, RegisterUser};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{UserSchema, ValidatedJson};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::IdPath;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::views::{MessageView, TokenView, UserView};

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<UserSchema>,
) -> Result<(StatusCode, Json<MessageView>), ApiError> {
    state
        .register_user_handler
        .handle(RegisterUser {
            credentials: payload.into(),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageView::new("User successfully created.")),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<UserSchema>,
) -> Result<Json<TokenView>, ApiError> {
    let response = state
        .login_user_handler
        .handle(LoginUser {
            credentials: payload.into(),
        })
        .await?;
    Ok(Json(TokenView {
        access_token: response.access_token,
    }))
}

/// GET /user/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    IdPath(user_id): IdPath<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.get_user_handler.handle(GetUser { user_id }).await?;
    Ok(Json(user.into()))
}

/// DELETE /user/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    IdPath(user_id): IdPath<i64>,
) -> Result<Json<MessageView>, ApiError> {
    tracing::info!(caller = caller.user_id, user_id, "User deletion requested");
    state.delete_user_handler.handle(DeleteUser { user_id }).await?;
    Ok(Json(MessageView::new("User deleted")))
}
