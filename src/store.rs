//! Data-access handle: read-only SQLite pool, startup schema check and per-call timeout.

use crate::config::Settings;
use crate::error::AppError;
use crate::schema::{reflect, ReflectedSchema};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Cheap to clone; every clone shares the pool and the reflected schema.
#[derive(Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
    schema: Arc<ReflectedSchema>,
    query_timeout: Duration,
}

impl ClimateStore {
    /// Open the configured database read-only and validate its schema. The database must already exist.
    pub async fn open(settings: &Settings) -> Result<Self, AppError> {
        let opts = SqliteConnectOptions::from_str(&settings.database_url)?
            .read_only(true)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.query_timeout)
            .connect_with(opts)
            .await?;
        tracing::info!(url = %settings.database_url, "opened climate database");
        Self::from_pool(pool, settings.query_timeout).await
    }

    /// Wrap an existing pool; fails if the declared tables are missing.
    pub async fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Result<Self, AppError> {
        let schema = reflect(&pool).await?;
        for table in &schema.tables {
            let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
            tracing::info!(table = %table.name, columns = ?columns, "schema validated");
        }
        Ok(ClimateStore {
            pool,
            schema: Arc::new(schema),
            query_timeout,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn schema(&self) -> &ReflectedSchema {
        &self.schema
    }

    /// Run one database call under the configured timeout.
    pub async fn timed<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res.map_err(AppError::Db),
            Err(_) => Err(AppError::Timeout(self.query_timeout.as_millis() as u64)),
        }
    }

    /// `SELECT 1` round trip, used by the readiness probe.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.timed(sqlx::query("SELECT 1").fetch_optional(&self.pool)).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
