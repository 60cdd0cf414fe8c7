use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::bid_request_handler::{
    get_bid_request_handler, health_handler, list_bid_requests_handler, statistics_handler,
    submit_bid_request_handler, update_bid_request_status_handler,
};
use crate::service::bid_service::BidServiceImpl;

pub fn bid_request_router(service: Arc<BidServiceImpl>) -> Router {
    Router::new()
        .route("/api/bid-request", post(submit_bid_request_handler))
        .route("/api/bid-requests", get(list_bid_requests_handler))
        .route("/api/bid-request/{id}", get(get_bid_request_handler))
        .route("/api/bid-request/{id}/status", put(update_bid_request_status_handler))
        .route("/api/statistics", get(statistics_handler))
        .route("/api/health", get(health_handler))
        .with_state(service)
}
