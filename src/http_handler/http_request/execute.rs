use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, NoBodyHTTPRequestType,
    path_segment,
};
use crate::http_handler::http_handler_common::{KnowledgeGraphInfo, PrdInfo};
use crate::http_handler::http_response::{
    execute::{ExecuteTaskResponse, TaskStatusResponse},
    response_common::RawBytesResponse,
};

/// Request type for the /execute endpoint: builds a website from a PRD and a knowledge graph.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct ExecuteTaskRequest {
    pub prd: PrdInfo,
    pub knowledge_graph: KnowledgeGraphInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_note: Option<String>,
}

impl JSONBodyHTTPRequestType for ExecuteTaskRequest {
    type Body = ExecuteTaskRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for ExecuteTaskRequest {
    type Response = ExecuteTaskResponse;
    fn endpoint(&self) -> String { String::from("/execute") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

#[derive(Debug)]
pub struct TaskStatusRequest {
    pub task_id: String,
}

impl NoBodyHTTPRequestType for TaskStatusRequest {}

impl HTTPRequestType for TaskStatusRequest {
    type Response = TaskStatusResponse;
    fn endpoint(&self) -> String { format!("/execute/status/{}", path_segment(&self.task_id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

/// Fetches the generated files of a task as one zip archive.
#[derive(Debug)]
pub struct TaskDownloadRequest {
    pub task_id: String,
}

impl NoBodyHTTPRequestType for TaskDownloadRequest {}

impl HTTPRequestType for TaskDownloadRequest {
    type Response = RawBytesResponse;
    fn endpoint(&self) -> String { format!("/execute/download/{}", path_segment(&self.task_id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
