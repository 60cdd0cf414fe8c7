use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::status::BidStatus;

/// A persisted bid request. Field values are stored trimmed and HTML-escaped;
/// they are interpolated into HTML email bodies as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: String,
    pub project_title: String,
    pub description: String,
    pub budget: String,
    pub timeline: String,
    pub services: Vec<String>,
    pub referral: Option<String>,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated, normalized submission ready for insertion. Produced only by
/// the validator; id, status and timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBidRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: String,
    pub project_title: String,
    pub description: String,
    pub budget: String,
    pub timeline: String,
    pub services: Vec<String>,
    pub referral: Option<String>,
}

/// Per-status counts over the whole table. total is always the sum of the
/// five status counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: i64,
    pub new: i64,
    pub reviewing: i64,
    pub quoted: i64,
    pub accepted: i64,
    pub rejected: i64,
}
