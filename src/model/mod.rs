pub mod bid_request;
pub mod status;
