//! Where the status counts come from.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::str::FromStr;
use thiserror::Error;

use crate::metric::Metric;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{metric} count is negative: {value}")]
    NegativeCount { metric: Metric, value: i64 },
}

/// Source of the numbers behind the status endpoints.
pub trait StatusStore: Send + Sync + 'static {
    fn count(&self, metric: Metric) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

/// Counts rows of the site's SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open `database_url` read-only. The database must already exist.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn count_query(metric: Metric) -> &'static str {
        match metric {
            Metric::Users => "SELECT COUNT(*) FROM user",
            Metric::Jokes => "SELECT COUNT(*) FROM joke",
        }
    }
}

impl StatusStore for SqliteStore {
    async fn count(&self, metric: Metric) -> Result<u64, StoreError> {
        let value: i64 = sqlx::query_scalar(Self::count_query(metric))
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(value).map_err(|_| StoreError::NegativeCount { metric, value })
    }
}

/// Constant counts, for demos and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCounts {
    pub users: u64,
    pub jokes: u64,
}

impl StatusStore for FixedCounts {
    async fn count(&self, metric: Metric) -> Result<u64, StoreError> {
        Ok(match metric {
            Metric::Users => self.users,
            Metric::Jokes => self.jokes,
        })
    }
}
