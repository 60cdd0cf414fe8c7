use async_trait::async_trait;
use bidform_backend::config::{DatabaseConfig, RateLimitConfig};
use bidform_backend::repository::db;
use bidform_backend::repository::rate_limit_repo::{RateLimitRepository, SqliteRateLimitRepository};
use bidform_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use bidform_backend::service::rate_limiter::{RateLimitExceeded, RateLimiter};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

async fn setup_limiter() -> (Arc<SqliteRateLimitRepository>, RateLimiter) {
    let config = DatabaseConfig::from_test_env();
    let pool = db::create_pool(&config).await.expect("Failed to create test pool");
    let repo = Arc::new(SqliteRateLimitRepository::new(pool));
    let limiter = RateLimiter::new(repo.clone(), RateLimitConfig::from_test_env());
    (repo, limiter)
}

#[tokio::test]
async fn test_admits_up_to_max_then_rejects() {
    let (_repo, limiter) = setup_limiter().await;

    for attempt in 1..=5 {
        assert!(
            limiter.admit("93.184.216.34").await.is_ok(),
            "attempt {} should be admitted",
            attempt
        );
    }
    assert_eq!(limiter.admit("93.184.216.34").await, Err(RateLimitExceeded));
}

#[tokio::test]
async fn test_addresses_are_counted_independently() {
    let (_repo, limiter) = setup_limiter().await;

    for _ in 0..5 {
        limiter.admit("93.184.216.34").await.expect("should admit");
    }
    assert!(limiter.admit("8.8.8.8").await.is_ok());
}

#[tokio::test]
async fn test_entries_outside_window_are_purged() {
    let (repo, limiter) = setup_limiter().await;

    // Backdate five entries past the 900s window
    let stale = Utc::now() - Duration::seconds(901);
    for _ in 0..5 {
        repo.record("93.184.216.34", stale).await.expect("record failed");
    }

    assert!(limiter.admit("93.184.216.34").await.is_ok());
    let count = repo.count_for_address("93.184.216.34").await.expect("count failed");
    assert_eq!(count, 1, "stale entries should be gone, fresh one recorded");
}

struct FailingRateLimitRepository;

#[async_trait]
impl RateLimitRepository for FailingRateLimitRepository {
    async fn purge_expired(&self, _cutoff: DateTime<Utc>) -> RepositoryResult<()> {
        Err(RepositoryError::connection("storage unreachable"))
    }

    async fn count_for_address(&self, _ip_address: &str) -> RepositoryResult<i64> {
        Err(RepositoryError::connection("storage unreachable"))
    }

    async fn record(&self, _ip_address: &str, _at: DateTime<Utc>) -> RepositoryResult<()> {
        Err(RepositoryError::connection("storage unreachable"))
    }
}

#[tokio::test]
async fn test_storage_failure_fails_open() {
    let limiter = RateLimiter::new(Arc::new(FailingRateLimitRepository), RateLimitConfig::from_test_env());
    assert!(limiter.admit("93.184.216.34").await.is_ok());
}
