use super::response_common::SerdeJSONBodyHTTPResponseType;
use crate::http_handler::http_handler_common::KnowledgeGraph;

/// Response type for /knowledge/extract and /upload/extract-knowledge.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct KnowledgeExtractResponse {
    pub graph: KnowledgeGraph,
    #[serde(default)]
    pub status: Option<String>,
}

impl SerdeJSONBodyHTTPResponseType for KnowledgeExtractResponse {}

/// Response type for /knowledge/save.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeSaveResponse {
    pub id: String,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

impl SerdeJSONBodyHTTPResponseType for KnowledgeSaveResponse {}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeListItem {
    pub id: String,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeListResponse {
    pub knowledge_graphs: Vec<KnowledgeListItem>,
}

impl SerdeJSONBodyHTTPResponseType for KnowledgeListResponse {}

/// A stored knowledge graph.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct KnowledgeRecord {
    pub id: String,
    pub name: String,
    pub graph: KnowledgeGraph,
    pub created_at: chrono::NaiveDateTime,
}

impl SerdeJSONBodyHTTPResponseType for KnowledgeRecord {}
