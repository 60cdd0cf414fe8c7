pub mod bid_request_repo;
pub mod db;
pub mod rate_limit_repo;
pub mod repository_error;
