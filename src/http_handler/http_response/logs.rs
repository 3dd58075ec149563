use super::response_common::SerdeJSONBodyHTTPResponseType;

/// One executed task as recorded in the backend logs.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub task_id: String,
    /// ISO-8601 time of the last state change, as written by the backend.
    pub timestamp: String,
    pub files: Vec<String>,
    pub status: String,
}

impl SerdeJSONBodyHTTPResponseType for LogEntry {}

/// Response type for /logs, newest entry first.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
}

impl SerdeJSONBodyHTTPResponseType for LogsResponse {}
