use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, MultipartBodyHTTPRequestType, NoBodyHTTPRequestType,
    RequestError, UploadFile,
};
use crate::http_handler::http_response::{
    knowledge::KnowledgeExtractResponse,
    prd::PrdGenerateResponse,
    upload::{UploadListResponse, UploadResponse},
};
use reqwest::multipart::Form;

/// Request type for the /upload/html endpoint.
///
/// Sends an HTML page, a URL pointing to one, or both.
#[derive(Debug, Clone)]
pub struct UploadHtmlRequest {
    file: Option<UploadFile>,
    url: Option<String>,
}

impl UploadHtmlRequest {
    pub fn from_file(file: UploadFile) -> Self { Self { file: Some(file), url: None } }

    pub fn from_url(url: impl Into<String>) -> Self { Self { file: None, url: Some(url.into()) } }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl MultipartBodyHTTPRequestType for UploadHtmlRequest {
    async fn body(&self) -> Result<Form, RequestError> {
        let mut form = Form::new();
        if let Some(file) = &self.file {
            form = form.part("file", file.to_part().await?);
        }
        if let Some(url) = &self.url {
            form = form.text("url", url.clone());
        }
        Ok(form)
    }
}

impl HTTPRequestType for UploadHtmlRequest {
    type Response = UploadResponse;
    fn endpoint(&self) -> String { String::from("/upload/html") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

/// Request type for the /upload/generate-prd endpoint.
#[derive(Debug, Clone)]
pub struct GeneratePrdFromFileRequest {
    file: UploadFile,
}

impl GeneratePrdFromFileRequest {
    pub fn new(file: UploadFile) -> Self { Self { file } }
}

impl MultipartBodyHTTPRequestType for GeneratePrdFromFileRequest {
    async fn body(&self) -> Result<Form, RequestError> {
        Ok(Form::new().part("file", self.file.to_part().await?))
    }
}

impl HTTPRequestType for GeneratePrdFromFileRequest {
    type Response = PrdGenerateResponse;
    fn endpoint(&self) -> String { String::from("/upload/generate-prd") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

/// Request type for the /upload/extract-knowledge endpoint.
#[derive(Debug, Clone)]
pub struct ExtractKnowledgeFromFileRequest {
    file: UploadFile,
}

impl ExtractKnowledgeFromFileRequest {
    pub fn new(file: UploadFile) -> Self { Self { file } }
}

impl MultipartBodyHTTPRequestType for ExtractKnowledgeFromFileRequest {
    async fn body(&self) -> Result<Form, RequestError> {
        Ok(Form::new().part("file", self.file.to_part().await?))
    }
}

impl HTTPRequestType for ExtractKnowledgeFromFileRequest {
    type Response = KnowledgeExtractResponse;
    fn endpoint(&self) -> String { String::from("/upload/extract-knowledge") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

#[derive(Debug)]
pub struct UploadListRequest {}

impl NoBodyHTTPRequestType for UploadListRequest {}

impl HTTPRequestType for UploadListRequest {
    type Response = UploadListResponse;
    fn endpoint(&self) -> String { String::from("/upload/list") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
