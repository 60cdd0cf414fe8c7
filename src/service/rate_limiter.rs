use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::RateLimitConfig;
use crate::repository::rate_limit_repo::RateLimitRepository;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Rate limit exceeded. Please try again later.")]
pub struct RateLimitExceeded;

/// Sliding-window submission gate backed by the rate_limits table.
///
/// Storage failures admit the request (fail-open): rate limiting is an abuse
/// deterrent and must never take the intake path down with it.
pub struct RateLimiter {
    repo: Arc<dyn RateLimitRepository>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(repo: Arc<dyn RateLimitRepository>, config: RateLimitConfig) -> Self {
        RateLimiter { repo, config }
    }

    /// Purge entries older than the window, count the remaining entries for
    /// this source address, reject at the configured maximum, otherwise
    /// record the attempt and admit. Check-then-insert is not atomic; a
    /// slight overshoot under concurrent submissions is acceptable.
    #[tracing::instrument(skip(self), fields(source = %source_address))]
    pub async fn admit(&self, source_address: &str) -> Result<(), RateLimitExceeded> {
        let now = Utc::now();
        let cutoff = now - Duration::seconds(self.config.window_seconds as i64);

        if let Err(e) = self.repo.purge_expired(cutoff).await {
            warn!("Rate limiting error, allowing request: {}", e);
            return Ok(());
        }

        let count = match self.repo.count_for_address(source_address).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Rate limiting error, allowing request: {}", e);
                return Ok(());
            }
        };

        if count >= self.config.max_requests as i64 {
            info!("Rate limit exceeded for {}", source_address);
            return Err(RateLimitExceeded);
        }

        if let Err(e) = self.repo.record(source_address, now).await {
            warn!("Failed to record rate limit entry: {}", e);
        }

        Ok(())
    }
}
