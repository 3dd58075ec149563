use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, NoBodyHTTPRequestType,
    path_segment,
};
use crate::http_handler::http_handler_common::{KnowledgeGraph, MessageResponse, ReferenceInfo};
use crate::http_handler::http_response::{
    knowledge::{
        KnowledgeExtractResponse, KnowledgeListResponse, KnowledgeRecord, KnowledgeSaveResponse,
    },
    response_common::RawBytesResponse,
};

/// Request type for the /knowledge/extract endpoint.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct KnowledgeExtractRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_info: Option<ReferenceInfo>,
}

impl KnowledgeExtractRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { reference_url: Some(url.into()), reference_info: None }
    }

    pub fn from_reference(info: ReferenceInfo) -> Self {
        Self { reference_url: None, reference_info: Some(info) }
    }
}

impl JSONBodyHTTPRequestType for KnowledgeExtractRequest {
    type Body = KnowledgeExtractRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for KnowledgeExtractRequest {
    type Response = KnowledgeExtractResponse;
    fn endpoint(&self) -> String { String::from("/knowledge/extract") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

/// Request type for the /knowledge/save endpoint.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct KnowledgeSaveRequest {
    pub name: String,
    pub graph: KnowledgeGraph,
}

impl JSONBodyHTTPRequestType for KnowledgeSaveRequest {
    type Body = KnowledgeSaveRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for KnowledgeSaveRequest {
    type Response = KnowledgeSaveResponse;
    fn endpoint(&self) -> String { String::from("/knowledge/save") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

#[derive(Debug)]
pub struct KnowledgeListRequest {}

impl NoBodyHTTPRequestType for KnowledgeListRequest {}

impl HTTPRequestType for KnowledgeListRequest {
    type Response = KnowledgeListResponse;
    fn endpoint(&self) -> String { String::from("/knowledge") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct KnowledgeGetRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for KnowledgeGetRequest {}

impl HTTPRequestType for KnowledgeGetRequest {
    type Response = KnowledgeRecord;
    fn endpoint(&self) -> String { format!("/knowledge/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct KnowledgeDeleteRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for KnowledgeDeleteRequest {}

impl HTTPRequestType for KnowledgeDeleteRequest {
    type Response = MessageResponse;
    fn endpoint(&self) -> String { format!("/knowledge/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Delete }
}

#[derive(Debug)]
pub struct KnowledgeDownloadRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for KnowledgeDownloadRequest {}

impl HTTPRequestType for KnowledgeDownloadRequest {
    type Response = RawBytesResponse;
    fn endpoint(&self) -> String { format!("/knowledge/download/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
