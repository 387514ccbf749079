//! SQLite Database - connection pool and schema

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config;

/// Pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Keep connections open forever. An in-memory database lives only as
    /// long as its connection.
    pub pin_connections: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&config::DatabaseConfig::default())
    }
}

impl From<&config::DatabaseConfig> for DatabaseConfig {
    fn from(cfg: &config::DatabaseConfig) -> Self {
        Self {
            database_url: cfg.url.clone(),
            max_connections: cfg.max_connections,
            acquire_timeout: Duration::from_secs(cfg.acquire_timeout_secs),
            pin_connections: false,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            pin_connections: true,
        }
    }
}

pub type DbPool = Pool<Sqlite>;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Create the connection pool. Every connection gets WAL, `busy_timeout`,
/// `synchronous=NORMAL` and `foreign_keys` when it is opened.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let mut options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout);
    if config.pin_connections {
        options = options.idle_timeout(None).max_lifetime(None);
    }
    let pool = options.connect_with(connect_options).await?;

    tracing::info!(
        max_connections = config.max_connections,
        busy_timeout_ms = BUSY_TIMEOUT.as_millis() as u64,
        "SQLite pool created with WAL mode"
    );

    Ok(pool)
}

/// Create the schema if it does not exist yet
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // price is kept as decimal text so no precision is lost
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price TEXT NOT NULL,
            store_id INTEGER NOT NULL,
            FOREIGN KEY (store_id) REFERENCES stores(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            store_id INTEGER NOT NULL,
            FOREIGN KEY (store_id) REFERENCES stores(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS item_tags (
            item_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (item_id, tag_id),
            FOREIGN KEY (item_id) REFERENCES items(id),
            FOREIGN KEY (tag_id) REFERENCES tags(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_store_id ON items(store_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tags_store_id ON tags(store_id)")
        .execute(pool)
        .await?;

    // item_tags(tag_id) for tag -> items lookups; the primary key covers item_id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_item_tags_tag_id ON item_tags(tag_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// True when a sqlx error is a UNIQUE or PRIMARY KEY violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // idempotent
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let result = sqlx::query("INSERT INTO items (name, price, store_id) VALUES ('x', '1', 99)")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unique_violation_detected() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO stores (name) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query("INSERT INTO stores (name) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_pragmas_apply_to_every_connection() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            database_url: format!("sqlite:{}?mode=rwc", dir.path().join("pragmas.db").display()),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(5),
            pin_connections: false,
        };
        let pool = create_pool(&config).await.unwrap();

        // two live connections at once forces the pool to open both
        let mut first = pool.acquire().await.unwrap();
        let mut second = pool.acquire().await.unwrap();
        for conn in [&mut first, &mut second] {
            let busy: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
                .fetch_one(&mut **conn)
                .await
                .unwrap();
            let synchronous: i64 = sqlx::query_scalar("PRAGMA synchronous")
                .fetch_one(&mut **conn)
                .await
                .unwrap();
            let journal: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(&mut **conn)
                .await
                .unwrap();

            assert_eq!(busy, 5000);
            assert_eq!(synchronous, 1);
            assert_eq!(journal, "wal");
        }
    }

    #[test]
    fn test_from_app_config() {
        let cfg = config::DatabaseConfig {
            url: "sqlite:test.db".to_string(),
            max_connections: 3,
            acquire_timeout_secs: 7,
        };
        let db = DatabaseConfig::from(&cfg);
        assert_eq!(db.database_url, "sqlite:test.db");
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.acquire_timeout, Duration::from_secs(7));
        assert!(!db.pin_connections);
    }
}
