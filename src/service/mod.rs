pub mod bid_service;
pub mod rate_limiter;
pub mod validation;
