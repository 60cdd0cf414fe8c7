pub mod bid_request_handler;
