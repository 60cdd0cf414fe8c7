pub mod bid_request_router;
