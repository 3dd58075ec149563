//! Documents exchanged by more than one endpoint.

use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Structure of a reference page, as extracted by the upload endpoint.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct ReferenceInfo {
    pub title: String,
    pub structure: Vec<serde_json::Value>,
    pub text_blocks: Vec<String>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeNodeData {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "placementHint", default, skip_serializing_if = "Option::is_none")]
    pub placement_hint: Option<String>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeNode {
    pub data: KnowledgeNodeData,
}

/// A knowledge graph in the node/edge layout the dashboard renders.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Default)]
pub struct KnowledgeGraph {
    pub nodes: Vec<KnowledgeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<serde_json::Value>,
}

impl KnowledgeGraph {
    pub fn node(&self, id: &str) -> Option<&KnowledgeNode> {
        self.nodes.iter().find(|node| node.data.id == id)
    }
}

/// A PRD as handed to the task executor.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdInfo {
    pub title: String,
    pub content: String,
}

/// A named knowledge graph as handed to the task executor.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct KnowledgeGraphInfo {
    pub name: String,
    pub graph: serde_json::Value,
}

/// Plain acknowledgement, e.g. after a delete.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl SerdeJSONBodyHTTPResponseType for MessageResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_hint_uses_camel_case_on_the_wire() {
        let node: KnowledgeNode = serde_json::from_str(
            r#"{"data":{"id":"chapter1","label":"Text basics","category":"media-block","placementHint":"main-content"}}"#,
        )
        .unwrap();
        assert_eq!(node.data.placement_hint.as_deref(), Some("main-content"));
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["data"]["placementHint"], "main-content");
    }

    #[test]
    fn optional_node_fields_are_omitted() {
        let node = KnowledgeNode {
            data: KnowledgeNodeData {
                id: String::from("n1"),
                label: String::from("Intro"),
                category: None,
                placement_hint: None,
            },
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, serde_json::json!({"data": {"id": "n1", "label": "Intro"}}));
    }

    #[test]
    fn graph_without_edges_parses() {
        let graph: KnowledgeGraph =
            serde_json::from_str(r#"{"nodes":[{"data":{"id":"a","label":"A"}}]}"#).unwrap();
        assert!(graph.edges.is_empty());
        assert_eq!(graph.node("a").map(|n| n.data.label.as_str()), Some("A"));
        assert!(graph.node("b").is_none());
    }
}
