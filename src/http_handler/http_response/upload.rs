use super::response_common::SerdeJSONBodyHTTPResponseType;
use crate::http_handler::http_handler_common::ReferenceInfo;

/// Response type for the /upload/html endpoint: the structure extracted from the page.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub title: String,
    pub structure: Vec<serde_json::Value>,
    pub text_blocks: Vec<String>,
    pub message: String,
}

impl SerdeJSONBodyHTTPResponseType for UploadResponse {}

impl UploadResponse {
    /// The extracted page, in the shape PRD generation takes as reference.
    pub fn reference_info(&self) -> ReferenceInfo {
        ReferenceInfo {
            title: self.title.clone(),
            structure: self.structure.clone(),
            text_blocks: self.text_blocks.clone(),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub size: u64,
    pub modified: chrono::NaiveDateTime,
}

/// Response type for the /upload/list endpoint.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadListResponse {
    pub files: Vec<UploadedFile>,
}

impl SerdeJSONBodyHTTPResponseType for UploadListResponse {}
