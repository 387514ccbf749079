//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::GetUser;
use crate::domain::user::User;

/// GetUser Handler
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUser) -> Result<User, ApplicationError> {
        self.user_repo
            .find_by_id(query.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", query.user_id))
    }
}
