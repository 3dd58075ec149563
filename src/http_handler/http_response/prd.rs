use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for /prd/generate and /upload/generate-prd.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdGenerateResponse {
    /// The generated document, markdown.
    pub prd_text: String,
    pub status: String,
}

impl SerdeJSONBodyHTTPResponseType for PrdGenerateResponse {}

/// Response type for /prd/save.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdSaveResponse {
    pub id: String,
    pub title: String,
    pub created_at: chrono::NaiveDateTime,
}

impl SerdeJSONBodyHTTPResponseType for PrdSaveResponse {}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdListItem {
    pub id: String,
    pub title: String,
    pub created_at: chrono::NaiveDateTime,
}

/// Response type for listing all stored PRDs.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdListResponse {
    pub prds: Vec<PrdListItem>,
}

impl SerdeJSONBodyHTTPResponseType for PrdListResponse {}

impl PrdListResponse {
    /// Most recently created first.
    pub fn newest_first(mut self) -> Vec<PrdListItem> {
        self.prds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.prds
    }
}

/// A stored PRD with its full content.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}

impl SerdeJSONBodyHTTPResponseType for PrdRecord {}
