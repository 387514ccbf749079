//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{is_unique_violation, DbPool};
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::user::User;

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, RepositoryError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepositoryError::Duplicate(format!("username '{}'", username))
                } else {
                    RepositoryError::DatabaseError(e.to_string())
                }
            })?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("user {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::test_support::Repos;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repos = Repos::new().await;
        let user = repos.user.create("alice", "$argon2id$stub").await.unwrap();

        assert_eq!(repos.user.find_by_id(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(repos.user.find_by_username("alice").await.unwrap(), Some(user));
        assert!(repos.user.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repos = Repos::new().await;
        repos.user.create("alice", "one").await.unwrap();

        let err = repos.user.create("alice", "two").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));

        // first account untouched
        let user = repos.user.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "one");
    }

    #[tokio::test]
    async fn test_delete() {
        let repos = Repos::new().await;
        let user = repos.user.create("alice", "hash").await.unwrap();

        repos.user.delete(user.id).await.unwrap();
        assert!(repos.user.find_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(
            repos.user.delete(user.id).await.unwrap_err(),
            RepositoryError::NotFound(_)
        ));
    }
}
