//! User Queries

/// Fetch one user
#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: i64,
}
