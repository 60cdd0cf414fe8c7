use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Persisted log of accepted submission attempts, one row per
/// (source address, timestamp) pair. Used only for window counting.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Delete every entry older than the cutoff.
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> RepositoryResult<()>;
    /// Count remaining entries for one source address.
    async fn count_for_address(&self, ip_address: &str) -> RepositoryResult<i64>;
    /// Record one accepted attempt.
    async fn record(&self, ip_address: &str, at: DateTime<Utc>) -> RepositoryResult<()>;
}

pub struct SqliteRateLimitRepository {
    pool: SqlitePool,
}

impl SqliteRateLimitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteRateLimitRepository { pool }
    }
}

#[async_trait]
impl RateLimitRepository for SqliteRateLimitRepository {
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM rate_limits WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        debug!("Purged {} expired rate limit entries", result.rows_affected());
        Ok(())
    }

    async fn count_for_address(&self, ip_address: &str) -> RepositoryResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rate_limits WHERE ip_address = ?")
            .bind(ip_address)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        debug!("Rate limit count for {}: {}", ip_address, count);
        Ok(count)
    }

    async fn record(&self, ip_address: &str, at: DateTime<Utc>) -> RepositoryResult<()> {
        sqlx::query("INSERT INTO rate_limits (ip_address, created_at) VALUES (?, ?)")
            .bind(ip_address)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }
}
