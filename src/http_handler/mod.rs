pub use serde;
pub use reqwest;
pub use chrono;

pub mod client_config;
pub mod common;
pub mod http_client;
pub mod http_handler_common;
pub mod http_request;
pub mod http_response;
