use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use crate::http_handler::http_response::test_task::TestTask;

/// Request type for the /test/generate-test-task endpoint.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct TestTaskRequest {
    pub topic_id: String,
    /// The knowledge graph node the exercise is about.
    pub knowledge_node: serde_json::Value,
    /// Learning content generated earlier for the same node, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_content: Option<serde_json::Value>,
}

impl JSONBodyHTTPRequestType for TestTaskRequest {
    type Body = TestTaskRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for TestTaskRequest {
    type Response = TestTask;
    fn endpoint(&self) -> String { String::from("/test/generate-test-task") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
