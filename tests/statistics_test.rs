use bidform_backend::config::DatabaseConfig;
use bidform_backend::model::bid_request::NewBidRequest;
use bidform_backend::model::status::BidStatus;
use bidform_backend::repository::bid_request_repo::{BidRequestRepository, SqliteBidRequestRepository};
use bidform_backend::repository::db;

async fn setup_repository() -> SqliteBidRequestRepository {
    let config = DatabaseConfig::from_test_env();
    let pool = db::create_pool(&config).await.expect("Failed to create test pool");
    SqliteBidRequestRepository::new(pool)
}

fn sample_request(email: &str) -> NewBidRequest {
    NewBidRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: None,
        company: None,
        project_type: "brand-identity".to_string(),
        project_title: "Rebrand".to_string(),
        description: "A complete brand identity refresh.".to_string(),
        budget: "under-5k".to_string(),
        timeline: "asap".to_string(),
        services: Vec::new(),
        referral: None,
    }
}

#[tokio::test]
async fn test_empty_table_counts_all_zero() {
    let repo = setup_repository().await;

    let stats = repo.count_by_status().await.expect("count failed");
    assert_eq!(stats.total, 0);
    assert_eq!(stats.new, 0);
    assert_eq!(stats.reviewing, 0);
    assert_eq!(stats.quoted, 0);
    assert_eq!(stats.accepted, 0);
    assert_eq!(stats.rejected, 0);
}

#[tokio::test]
async fn test_total_equals_sum_of_status_counts() {
    let repo = setup_repository().await;

    let mut ids = Vec::new();
    for i in 0..6 {
        let created = repo
            .create(sample_request(&format!("user{}@example.com", i)))
            .await
            .expect("create failed");
        ids.push(created.id);
    }

    repo.update_status(ids[0], BidStatus::Reviewing).await.expect("update failed");
    repo.update_status(ids[1], BidStatus::Quoted).await.expect("update failed");
    repo.update_status(ids[2], BidStatus::Accepted).await.expect("update failed");
    repo.update_status(ids[3], BidStatus::Rejected).await.expect("update failed");

    let stats = repo.count_by_status().await.expect("count failed");
    assert_eq!(stats.total, 6);
    assert_eq!(stats.new, 2);
    assert_eq!(stats.reviewing, 1);
    assert_eq!(stats.quoted, 1);
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(
        stats.total,
        stats.new + stats.reviewing + stats.quoted + stats.accepted + stats.rejected
    );
}
