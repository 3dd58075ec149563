use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use crate::http_handler::http_handler_common::KnowledgeNodeData;
use crate::http_handler::http_response::learning::KnowledgePointContent;

/// Request type for the /learning/generate-knowledge-point endpoint.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgePointRequest {
    /// Id of the knowledge point in its graph.
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Page elements the learning content should use.
    pub select_element: Vec<String>,
}

impl KnowledgePointRequest {
    /// Builds the request for a graph node; its category becomes the point type.
    pub fn for_node(node: &KnowledgeNodeData, select_element: Vec<String>) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: node.category.clone().unwrap_or_default(),
            select_element,
        }
    }
}

impl JSONBodyHTTPRequestType for KnowledgePointRequest {
    type Body = KnowledgePointRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for KnowledgePointRequest {
    type Response = KnowledgePointContent;
    fn endpoint(&self) -> String { String::from("/learning/generate-knowledge-point") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
