use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType, path_segment,
};
use crate::http_handler::http_handler_common::MessageResponse;
use crate::http_handler::http_response::logs::{LogEntry, LogsResponse};

#[derive(Debug)]
pub struct LogsListRequest {}

impl NoBodyHTTPRequestType for LogsListRequest {}

impl HTTPRequestType for LogsListRequest {
    type Response = LogsResponse;
    fn endpoint(&self) -> String { String::from("/logs") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct LogDetailRequest {
    pub task_id: String,
}

impl NoBodyHTTPRequestType for LogDetailRequest {}

impl HTTPRequestType for LogDetailRequest {
    type Response = LogEntry;
    fn endpoint(&self) -> String { format!("/logs/{}", path_segment(&self.task_id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct LogDeleteRequest {
    pub task_id: String,
}

impl NoBodyHTTPRequestType for LogDeleteRequest {}

impl HTTPRequestType for LogDeleteRequest {
    type Response = MessageResponse;
    fn endpoint(&self) -> String { format!("/logs/{}", path_segment(&self.task_id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Delete }
}
