pub mod client_ip;
pub mod email;
pub mod error;
pub mod logger;
