use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use bidform_backend::config::{DatabaseConfig, RateLimitConfig};
use bidform_backend::model::bid_request::BidRequest;
use bidform_backend::repository::bid_request_repo::SqliteBidRequestRepository;
use bidform_backend::repository::db;
use bidform_backend::repository::rate_limit_repo::SqliteRateLimitRepository;
use bidform_backend::router::bid_request_router::bid_request_router;
use bidform_backend::service::bid_service::BidServiceImpl;
use bidform_backend::service::rate_limiter::RateLimiter;
use bidform_backend::util::email::{BidNotifier, EmailDispatchResult};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

struct MockNotifier {
    client: bool,
    admin: bool,
}

#[async_trait]
impl BidNotifier for MockNotifier {
    async fn notify(&self, _bid: &BidRequest) -> EmailDispatchResult {
        EmailDispatchResult {
            client: self.client,
            admin: self.admin,
        }
    }
}

async fn setup_app() -> Router {
    let config = DatabaseConfig::from_test_env();
    let pool = db::create_pool(&config).await.expect("Failed to create test pool");
    let repo = Arc::new(SqliteBidRequestRepository::new(pool.clone()));
    let rate_limit_repo = Arc::new(SqliteRateLimitRepository::new(pool));
    let rate_limiter = RateLimiter::new(rate_limit_repo, RateLimitConfig::from_test_env());
    let service = Arc::new(BidServiceImpl {
        repo,
        rate_limiter,
        notifier: Arc::new(MockNotifier {
            client: true,
            admin: true,
        }),
    });
    bid_request_router(service).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

fn valid_body() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane.doe@example.com",
        "projectType": "web-design",
        "projectTitle": "Marketing site refresh",
        "description": "A complete redesign of our marketing site.",
        "budget": "10k-25k",
        "timeline": "2-3-months",
        "services": ["branding", "web-design"]
    })
}

async fn submit(app: &Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/bid-request")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn put_status(app: &Router, id: i64, status_value: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/bid-request/{}/status", id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": status_value }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_submit_valid_bid_request() {
    let app = setup_app().await;

    let (status, body) = submit(&app, valid_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Bid request submitted successfully"));
    assert_eq!(body["data"]["bidId"], json!(1));
    assert_eq!(body["data"]["emailSent"]["client"], json!(true));
    assert_eq!(body["data"]["emailSent"]["admin"], json!(true));
}

#[tokio::test]
async fn test_submit_invalid_payload_returns_all_errors() {
    let app = setup_app().await;

    let (status, body) = submit(&app, json!({ "email": "nope", "description": "short" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation failed"));
    let errors = body["data"]["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("First name is required")));
    assert!(errors.contains(&json!("Valid email is required")));
    assert!(errors.contains(&json!("Description must be at least 10 characters")));
}

#[tokio::test]
async fn test_sixth_submission_in_window_is_rate_limited() {
    let app = setup_app().await;

    for i in 1..=5 {
        let (status, _) = submit(&app, valid_body()).await;
        assert_eq!(status, StatusCode::OK, "submission {} should succeed", i);
    }

    let (status, body) = submit(&app, valid_body()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Rate limit exceeded. Please try again later."));
}

#[tokio::test]
async fn test_list_and_get_round_trip() {
    let app = setup_app().await;

    submit(&app, valid_body()).await;

    let (status, body) = get(&app, "/api/bid-requests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["firstName"], json!("Jane"));
    assert_eq!(records[0]["status"], json!("new"));
    assert_eq!(records[0]["services"], json!(["branding", "web-design"]));

    let (status, body) = get(&app, "/api/bid-request/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("jane.doe@example.com"));
    assert_eq!(body["data"]["services"], json!(["branding", "web-design"]));
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/bid-request/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Bid request not found"));
}

#[tokio::test]
async fn test_update_status_lifecycle() {
    let app = setup_app().await;

    submit(&app, valid_body()).await;

    let (status, body) = put_status(&app, 1, "reviewing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Status updated successfully"));

    let (_, body) = get(&app, "/api/bid-request/1").await;
    assert_eq!(body["data"]["status"], json!("reviewing"));
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status() {
    let app = setup_app().await;

    submit(&app, valid_body()).await;

    let (status, body) = put_status(&app, 1, "bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid status"));

    // Record is unchanged
    let (_, body) = get(&app, "/api/bid-request/1").await;
    assert_eq!(body["data"]["status"], json!("new"));
}

#[tokio::test]
async fn test_update_status_unknown_id_returns_404() {
    let app = setup_app().await;

    let (status, body) = put_status(&app, 999, "reviewing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_statistics_endpoint() {
    let app = setup_app().await;

    submit(&app, valid_body()).await;
    submit(&app, valid_body()).await;
    put_status(&app, 1, "quoted").await;

    let (status, body) = get(&app, "/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(2));
    assert_eq!(body["data"]["new"], json!(1));
    assert_eq!(body["data"]["quoted"], json!(1));
    assert_eq!(body["data"]["reviewing"], json!(0));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Server is running"));
}
