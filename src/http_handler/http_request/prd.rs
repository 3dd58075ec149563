use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, NoBodyHTTPRequestType,
    path_segment,
};
use crate::http_handler::http_handler_common::{MessageResponse, ReferenceInfo};
use crate::http_handler::http_response::{
    prd::{PrdGenerateResponse, PrdListResponse, PrdRecord, PrdSaveResponse},
    response_common::RawBytesResponse,
};

/// Request type for the /prd/generate endpoint.
///
/// The backend needs at least one of the two references and answers 422 otherwise.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct PrdGenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_info: Option<ReferenceInfo>,
}

impl PrdGenerateRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { reference_url: Some(url.into()), reference_info: None }
    }

    pub fn from_reference(info: ReferenceInfo) -> Self {
        Self { reference_url: None, reference_info: Some(info) }
    }
}

impl JSONBodyHTTPRequestType for PrdGenerateRequest {
    type Body = PrdGenerateRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for PrdGenerateRequest {
    type Response = PrdGenerateResponse;
    fn endpoint(&self) -> String { String::from("/prd/generate") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

/// Request type for the /prd/save endpoint.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PrdSaveRequest {
    pub title: String,
    pub content: String,
}

impl JSONBodyHTTPRequestType for PrdSaveRequest {
    type Body = PrdSaveRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for PrdSaveRequest {
    type Response = PrdSaveResponse;
    fn endpoint(&self) -> String { String::from("/prd/save") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

#[derive(Debug)]
pub struct PrdListRequest {}

impl NoBodyHTTPRequestType for PrdListRequest {}

impl HTTPRequestType for PrdListRequest {
    type Response = PrdListResponse;
    fn endpoint(&self) -> String { String::from("/prd") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct PrdGetRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for PrdGetRequest {}

impl HTTPRequestType for PrdGetRequest {
    type Response = PrdRecord;
    fn endpoint(&self) -> String { format!("/prd/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

#[derive(Debug)]
pub struct PrdDeleteRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for PrdDeleteRequest {}

impl HTTPRequestType for PrdDeleteRequest {
    type Response = MessageResponse;
    fn endpoint(&self) -> String { format!("/prd/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Delete }
}

/// Fetches the stored PRD as a file (JSON document, not parsed).
#[derive(Debug)]
pub struct PrdDownloadRequest {
    pub id: String,
}

impl NoBodyHTTPRequestType for PrdDownloadRequest {}

impl HTTPRequestType for PrdDownloadRequest {
    type Response = RawBytesResponse;
    fn endpoint(&self) -> String { format!("/prd/download/{}", path_segment(&self.id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
