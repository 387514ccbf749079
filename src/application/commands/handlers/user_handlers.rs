//! User Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteUser, LoginUser, RegisterUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    PasswordHasherPort, RepositoryError, TokenServicePort, UserRepositoryPort,
};

const USERNAME_TAKEN: &str = "Username already taken.";

/// Hashed once per handler; verified against when the username is unknown
const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-users";

// ============================================================================
// RegisterUser
// ============================================================================

pub struct RegisterUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl RegisterUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn handle(&self, command: RegisterUser) -> Result<(), ApplicationError> {
        let credentials = command.credentials;

        if self
            .user_repo
            .find_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(ApplicationError::conflict(USERNAME_TAKEN));
        }

        let password_hash = self.hasher.hash(&credentials.password)?;

        // UNIQUE(username) still decides a race between two registrations
        let user = match self
            .user_repo
            .create(&credentials.username, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(RepositoryError::Duplicate(_)) => {
                return Err(ApplicationError::conflict(USERNAME_TAKEN))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(())
    }
}

// ============================================================================
// LoginUser
// ============================================================================

#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub access_token: String,
}

pub struct LoginUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    tokens: Arc<dyn TokenServicePort>,
    placeholder_hash: Option<String>,
}

impl LoginUserHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenServicePort>,
    ) -> Self {
        let placeholder_hash = match hasher.hash(PLACEHOLDER_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Could not prepare placeholder hash");
                None
            }
        };

        Self {
            user_repo,
            hasher,
            tokens,
            placeholder_hash,
        }
    }

    pub async fn handle(&self, command: LoginUser) -> Result<LoginResponse, ApplicationError> {
        let credentials = command.credentials;

        let user = self.user_repo.find_by_username(&credentials.username).await?;
        let verified = match &user {
            Some(user) => self.hasher.verify(&credentials.password, &user.password_hash),
            None => {
                // same hashing cost whether or not the username exists
                if let Some(hash) = &self.placeholder_hash {
                    self.hasher.verify(&credentials.password, hash);
                }
                false
            }
        };

        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::info!(username = %credentials.username, "Login rejected");
                return Err(ApplicationError::InvalidCredentials);
            }
        };

        let access_token = self.tokens.issue(user.id)?;

        tracing::info!(user_id = user.id, "Access token issued");

        Ok(LoginResponse { access_token })
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: DeleteUser) -> Result<(), ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        self.user_repo.delete(user.id).await?;

        tracing::info!(user_id = user.id, "User deleted");

        Ok(())
    }
}
