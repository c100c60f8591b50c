use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        // Every connection to an in-memory database is a database of its own.
        let max_connections = if db_path.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };

        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LocalStorage for SqliteRepository {
    async fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let result = sqlx::query_as::<_, (String,)>("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result.map(|r| r.0))
    }

    async fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query("INSERT OR REPLACE INTO local_storage (key, value, updated) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_item() {
        let repo = SqliteRepository::new("sqlite::memory:").await.unwrap();
        assert_eq!(repo.get_item("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_item_overwrites() {
        let repo = SqliteRepository::new("sqlite::memory:").await.unwrap();
        repo.set_item("favorites", "[1]").await.unwrap();
        repo.set_item("favorites", "[1,2]").await.unwrap();
        assert_eq!(repo.get_item("favorites").await.unwrap().as_deref(), Some("[1,2]"));

        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM local_storage")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
