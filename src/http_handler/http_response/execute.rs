use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for /execute.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecuteTaskResponse {
    pub task_id: String,
    /// Names of the generated files.
    pub files: Vec<String>,
    pub status: String,
}

impl SerdeJSONBodyHTTPResponseType for ExecuteTaskResponse {}

/// Response type for /execute/status/{task_id}.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: String,
    pub message: String,
    pub files: Vec<String>,
}

impl SerdeJSONBodyHTTPResponseType for TaskStatusResponse {}

impl TaskStatusResponse {
    pub fn is_success(&self) -> bool { self.status == "success" }
}
