use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::bid_request_dto::SubmitBidRequest;
use crate::model::bid_request::{BidRequest, Statistics};
use crate::model::status::BidStatus;
use crate::repository::bid_request_repo::BidRequestRepository;
use crate::service::rate_limiter::RateLimiter;
use crate::service::validation;
use crate::util::email::{BidNotifier, EmailDispatchResult};
use crate::util::error::ServiceError;

#[async_trait]
pub trait BidService: Send + Sync {
    /// Full intake path: rate-limit gate, validation, insert, then
    /// best-effort notification.
    async fn submit(
        &self,
        dto: SubmitBidRequest,
        source_address: &str,
    ) -> Result<(BidRequest, EmailDispatchResult), ServiceError>;
    async fn get_bid_request(&self, id: i64) -> Result<BidRequest, ServiceError>;
    async fn list_bid_requests(&self) -> Result<Vec<BidRequest>, ServiceError>;
    async fn update_status(&self, id: i64, status: &str) -> Result<BidRequest, ServiceError>;
    async fn statistics(&self) -> Result<Statistics, ServiceError>;
}

pub struct BidServiceImpl {
    pub repo: Arc<dyn BidRequestRepository>,
    pub rate_limiter: RateLimiter,
    pub notifier: Arc<dyn BidNotifier>,
}

#[async_trait]
impl BidService for BidServiceImpl {
    #[instrument(skip(self, dto), fields(source = %source_address))]
    async fn submit(
        &self,
        dto: SubmitBidRequest,
        source_address: &str,
    ) -> Result<(BidRequest, EmailDispatchResult), ServiceError> {
        info!("Handling bid request submission");

        self.rate_limiter
            .admit(source_address)
            .await
            .map_err(|e| ServiceError::RateLimited(e.to_string()))?;

        let new = validation::validate(&dto).map_err(ServiceError::Validation)?;

        let bid = self.repo.create(new).await.map_err(|e| {
            error!("Failed to persist bid request: {}", e);
            ServiceError::from(e)
        })?;

        // The record is durable at this point; notification failures only
        // show up in the emailSent flags.
        let dispatch = self.notifier.notify(&bid).await;

        info!(
            bid_id = bid.id,
            client_sent = dispatch.client,
            admin_sent = dispatch.admin,
            "Bid request submitted successfully"
        );
        Ok((bid, dispatch))
    }

    #[instrument(skip(self), fields(id = id))]
    async fn get_bid_request(&self, id: i64) -> Result<BidRequest, ServiceError> {
        info!("Getting bid request by id");
        let res = self.repo.get_by_id(id).await;
        match &res {
            Ok(_) => info!("Bid request fetched successfully"),
            Err(e) => error!("Failed to fetch bid request: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_bid_requests(&self) -> Result<Vec<BidRequest>, ServiceError> {
        info!("Listing bid requests");
        let res = self.repo.list().await;
        match &res {
            Ok(requests) => info!("Fetched {} bid requests", requests.len()),
            Err(e) => error!("Failed to list bid requests: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = id, status = %status))]
    async fn update_status(&self, id: i64, status: &str) -> Result<BidRequest, ServiceError> {
        info!("Updating bid request status");
        let status: BidStatus = status
            .parse()
            .map_err(|_| ServiceError::InvalidInput("Invalid status".to_string()))?;
        let res = self.repo.update_status(id, status).await;
        match &res {
            Ok(_) => info!("Bid request status updated successfully"),
            Err(e) => error!("Failed to update bid request status: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn statistics(&self) -> Result<Statistics, ServiceError> {
        info!("Aggregating bid request statistics");
        let res = self.repo.count_by_status().await;
        match &res {
            Ok(stats) => info!("Statistics computed, {} total requests", stats.total),
            Err(e) => error!("Failed to compute statistics: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
