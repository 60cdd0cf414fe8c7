use bidform_backend::config::DatabaseConfig;
use bidform_backend::model::bid_request::NewBidRequest;
use bidform_backend::model::status::BidStatus;
use bidform_backend::repository::bid_request_repo::{BidRequestRepository, SqliteBidRequestRepository};
use bidform_backend::repository::db;
use bidform_backend::repository::repository_error::RepositoryError;
use sqlx::SqlitePool;

async fn setup_repository() -> (SqlitePool, SqliteBidRequestRepository) {
    let config = DatabaseConfig::from_test_env();
    let pool = db::create_pool(&config).await.expect("Failed to create test pool");
    (pool.clone(), SqliteBidRequestRepository::new(pool))
}

fn sample_request(email: &str) -> NewBidRequest {
    NewBidRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: Some("+1 555 123 4567".to_string()),
        company: None,
        project_type: "web-design".to_string(),
        project_title: "Marketing site refresh".to_string(),
        description: "A complete redesign of our marketing site.".to_string(),
        budget: "10k-25k".to_string(),
        timeline: "2-3-months".to_string(),
        services: vec!["branding".to_string(), "web-design".to_string()],
        referral: Some("search".to_string()),
    }
}

#[tokio::test]
async fn test_create_assigns_id_status_and_timestamps() {
    let (_pool, repo) = setup_repository().await;

    let created = repo.create(sample_request("jane@example.com")).await.expect("create failed");
    assert!(created.id > 0);
    assert_eq!(created.status, BidStatus::New);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get_by_id(created.id).await.expect("get failed");
    assert_eq!(fetched.email, "jane@example.com");
    assert_eq!(fetched.status, BidStatus::New);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_services_round_trip() {
    let (_pool, repo) = setup_repository().await;

    let created = repo.create(sample_request("jane@example.com")).await.expect("create failed");
    let fetched = repo.get_by_id(created.id).await.expect("get failed");
    assert_eq!(fetched.services, vec!["branding".to_string(), "web-design".to_string()]);

    let listed = repo.list().await.expect("list failed");
    assert_eq!(listed[0].services, vec!["branding".to_string(), "web-design".to_string()]);
}

#[tokio::test]
async fn test_malformed_services_reads_back_empty() {
    let (pool, repo) = setup_repository().await;

    sqlx::query(
        r#"INSERT INTO bid_requests
            (first_name, last_name, email, project_type, project_title,
             description, budget, timeline, services, status, created_at, updated_at)
           VALUES ('Jane', 'Doe', 'jane@example.com', 'web-design', 'Title',
                   'A long enough description.', '10k-25k', 'asap', 'not-json',
                   'new', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')"#,
    )
    .execute(&pool)
    .await
    .expect("raw insert failed");

    let fetched = repo.get_by_id(1).await.expect("get failed");
    assert!(fetched.services.is_empty());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let (_pool, repo) = setup_repository().await;

    let first = repo.create(sample_request("first@example.com")).await.expect("create failed");
    let second = repo.create(sample_request("second@example.com")).await.expect("create failed");
    let third = repo.create(sample_request("third@example.com")).await.expect("create failed");

    let listed = repo.list().await.expect("list failed");
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, third.id);
    assert_eq!(listed[1].id, second.id);
    assert_eq!(listed[2].id, first.id);
}

#[tokio::test]
async fn test_update_status_refreshes_updated_at_only() {
    let (_pool, repo) = setup_repository().await;

    let created = repo.create(sample_request("jane@example.com")).await.expect("create failed");
    let updated = repo
        .update_status(created.id, BidStatus::Reviewing)
        .await
        .expect("update_status failed");

    assert_eq!(updated.status, BidStatus::Reviewing);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Any-to-any transitions are allowed, including out of "terminal" states
    let updated = repo
        .update_status(created.id, BidStatus::Rejected)
        .await
        .expect("update_status failed");
    assert_eq!(updated.status, BidStatus::Rejected);
    let updated = repo
        .update_status(created.id, BidStatus::New)
        .await
        .expect("update_status failed");
    assert_eq!(updated.status, BidStatus::New);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (_pool, repo) = setup_repository().await;

    match repo.get_by_id(999).await {
        Err(RepositoryError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.id)),
    }

    match repo.update_status(999, BidStatus::New).await {
        Err(RepositoryError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.id)),
    }
}
