use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType, path_segment, path_segments,
};
use crate::http_handler::http_response::response_common::{RawBytesResponse, TextResponse};

/// Renders the generated website of a task; the response is HTML.
#[derive(Debug)]
pub struct PreviewWebsiteRequest {
    pub task_id: String,
}

impl NoBodyHTTPRequestType for PreviewWebsiteRequest {}

impl HTTPRequestType for PreviewWebsiteRequest {
    type Response = TextResponse;
    fn endpoint(&self) -> String { format!("/preview/{}", path_segment(&self.task_id)) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

/// Fetches one asset of a generated website, e.g. `css/style.css`.
#[derive(Debug)]
pub struct PreviewFileRequest {
    pub task_id: String,
    pub file_path: String,
}

impl NoBodyHTTPRequestType for PreviewFileRequest {}

impl HTTPRequestType for PreviewFileRequest {
    type Response = RawBytesResponse;
    fn endpoint(&self) -> String {
        format!("/preview/file/{}/{}", path_segment(&self.task_id), path_segments(&self.file_path))
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
