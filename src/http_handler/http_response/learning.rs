use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Generated learning material for one knowledge point, split into difficulty levels.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct KnowledgePointContent {
    pub topic_id: String,
    pub title: String,
    pub levels: Vec<serde_json::Value>,
}

impl SerdeJSONBodyHTTPResponseType for KnowledgePointContent {}
