use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::model::bid_request::{BidRequest, NewBidRequest, Statistics};
use crate::model::status::BidStatus;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait BidRequestRepository: Send + Sync {
    async fn create(&self, new: NewBidRequest) -> RepositoryResult<BidRequest>;
    async fn get_by_id(&self, id: i64) -> RepositoryResult<BidRequest>;
    async fn list(&self) -> RepositoryResult<Vec<BidRequest>>;
    async fn update_status(&self, id: i64, status: BidStatus) -> RepositoryResult<BidRequest>;
    async fn count_by_status(&self) -> RepositoryResult<Statistics>;
}

pub struct SqliteBidRequestRepository {
    pool: SqlitePool,
}

impl SqliteBidRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteBidRequestRepository { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BidRequestRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    project_type: String,
    project_title: String,
    description: String,
    budget: String,
    timeline: String,
    services: Option<String>,
    referral: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BidRequestRow> for BidRequest {
    type Error = RepositoryError;

    fn try_from(row: BidRequestRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<BidStatus>().map_err(|_| {
            RepositoryError::serialization(format!("Unknown status in row {}: {}", row.id, row.status))
        })?;
        // Absent or malformed services content reads back as an empty set.
        let services = row
            .services
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default();
        Ok(BidRequest {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            project_type: row.project_type,
            project_title: row.project_title,
            description: row.description,
            budget: row.budget,
            timeline: row.timeline,
            services,
            referral: row.referral,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BidRequestRepository for SqliteBidRequestRepository {
    #[tracing::instrument(skip(self, new), fields(email = %new.email, project_title = %new.project_title))]
    async fn create(&self, new: NewBidRequest) -> RepositoryResult<BidRequest> {
        info!("Creating new bid request");

        let now = Utc::now();
        let services_json = serde_json::to_string(&new.services)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize services: {}", e)))?;

        let result = sqlx::query(
            r#"INSERT INTO bid_requests
                (first_name, last_name, email, phone, company, project_type,
                 project_title, description, budget, timeline, services, referral,
                 status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'new', ?, ?)"#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.company)
        .bind(&new.project_type)
        .bind(&new.project_title)
        .bind(&new.description)
        .bind(&new.budget)
        .bind(&new.timeline)
        .bind(&services_json)
        .bind(&new.referral)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create bid request: {}", e);
            RepositoryError::from(e)
        })?;

        let id = result.last_insert_rowid();
        info!("Bid request created successfully with id {}", id);

        Ok(BidRequest {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            project_type: new.project_type,
            project_title: new.project_title,
            description: new.description,
            budget: new.budget,
            timeline: new.timeline,
            services: new.services,
            referral: new.referral,
            status: BidStatus::New,
            created_at: now,
            updated_at: now,
        })
    }

    #[tracing::instrument(skip(self), fields(id = id))]
    async fn get_by_id(&self, id: i64) -> RepositoryResult<BidRequest> {
        info!("Fetching bid request by id: {}", id);

        let row = sqlx::query_as::<_, BidRequestRow>("SELECT * FROM bid_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch bid request {}: {}", id, e);
                RepositoryError::from(e)
            })?;

        match row {
            Some(row) => row.try_into(),
            None => {
                error!("Bid request not found for id: {}", id);
                Err(RepositoryError::not_found(format!("Bid request not found for id: {}", id)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<BidRequest>> {
        info!("Listing bid requests");

        let rows = sqlx::query_as::<_, BidRequestRow>(
            "SELECT * FROM bid_requests ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list bid requests: {}", e);
            RepositoryError::from(e)
        })?;

        let requests = rows
            .into_iter()
            .map(BidRequest::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;
        info!("Fetched {} bid requests", requests.len());
        Ok(requests)
    }

    #[tracing::instrument(skip(self), fields(id = id, status = %status))]
    async fn update_status(&self, id: i64, status: BidStatus) -> RepositoryResult<BidRequest> {
        info!("Updating bid request status");

        let result = sqlx::query("UPDATE bid_requests SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update status for bid request {}: {}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            error!("No bid request found to update status for id: {}", id);
            return Err(RepositoryError::not_found(format!(
                "Bid request not found for id: {}",
                id
            )));
        }

        info!("Status updated successfully for bid request {}", id);
        self.get_by_id(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn count_by_status(&self) -> RepositoryResult<Statistics> {
        info!("Counting bid requests by status");

        #[derive(sqlx::FromRow)]
        struct StatisticsRow {
            total: i64,
            new_count: i64,
            reviewing_count: i64,
            quoted_count: i64,
            accepted_count: i64,
            rejected_count: i64,
        }

        let row = sqlx::query_as::<_, StatisticsRow>(
            r#"SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'new' THEN 1 ELSE 0 END), 0) AS new_count,
                COALESCE(SUM(CASE WHEN status = 'reviewing' THEN 1 ELSE 0 END), 0) AS reviewing_count,
                COALESCE(SUM(CASE WHEN status = 'quoted' THEN 1 ELSE 0 END), 0) AS quoted_count,
                COALESCE(SUM(CASE WHEN status = 'accepted' THEN 1 ELSE 0 END), 0) AS accepted_count,
                COALESCE(SUM(CASE WHEN status = 'rejected' THEN 1 ELSE 0 END), 0) AS rejected_count
               FROM bid_requests"#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to count bid requests: {}", e);
            RepositoryError::from(e)
        })?;

        Ok(Statistics {
            total: row.total,
            new: row.new_count,
            reviewing: row.reviewing_count,
            quoted: row.quoted_count,
            accepted: row.accepted_count,
            rejected: row.rejected_count,
        })
    }
}
