pub mod bid_request_dto;
