use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::dto::bid_request_dto::{ApiResponse, SubmitBidRequest, UpdateStatusRequest};
use crate::service::bid_service::{BidService, BidServiceImpl};
use crate::util::client_ip::client_ip;
use crate::util::error::HandlerError;

pub async fn submit_bid_request_handler(
    State(service): State<Arc<BidServiceImpl>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<SubmitBidRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let source = client_ip(&headers, remote);
    info!("[submit_bid_request_handler] Submission from {}", source);

    let (bid, email_sent) = service
        .submit(payload, &source)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(ApiResponse::ok(
        "Bid request submitted successfully",
        json!({ "bidId": bid.id, "emailSent": email_sent }),
    )))
}

pub async fn list_bid_requests_handler(
    State(service): State<Arc<BidServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let requests = service.list_bid_requests().await.map_err(HandlerError::from)?;
    Ok(Json(ApiResponse::ok(
        "Bid requests retrieved successfully",
        json!(requests),
    )))
}

pub async fn get_bid_request_handler(
    State(service): State<Arc<BidServiceImpl>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let bid = service.get_bid_request(id).await.map_err(HandlerError::from)?;
    Ok(Json(ApiResponse::ok(
        "Bid request retrieved successfully",
        json!(bid),
    )))
}

pub async fn update_bid_request_status_handler(
    State(service): State<Arc<BidServiceImpl>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service
        .update_status(id, &payload.status)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(ApiResponse::ok_message("Status updated successfully")))
}

pub async fn statistics_handler(
    State(service): State<Arc<BidServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.statistics().await.map_err(HandlerError::from)?;
    Ok(Json(ApiResponse::ok(
        "Statistics retrieved successfully",
        json!(stats),
    )))
}

pub async fn health_handler() -> impl IntoResponse {
    Json(ApiResponse::ok(
        "Server is running",
        json!({ "timestamp": chrono::Utc::now().to_rfc3339() }),
    ))
}
