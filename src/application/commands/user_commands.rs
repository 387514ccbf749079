//! User Commands

use crate::domain::user::Credentials;

/// Register a new account
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub credentials: Credentials,
}

/// Exchange credentials for an access token
#[derive(Debug, Clone)]
pub struct LoginUser {
    pub credentials: Credentials,
}

/// Delete an account
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: i64,
}
