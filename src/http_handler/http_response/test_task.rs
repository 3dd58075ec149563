use super::response_common::SerdeJSONBodyHTTPResponseType;
use std::collections::BTreeMap;

/// A generated coding exercise.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TestTask {
    pub topic_id: String,
    pub title: String,
    pub description_md: String,
    /// File name to starter code.
    pub start_code: BTreeMap<String, String>,
    pub checkpoints: Vec<serde_json::Value>,
    /// File name to reference solution.
    pub answer: BTreeMap<String, String>,
}

impl SerdeJSONBodyHTTPResponseType for TestTask {}
