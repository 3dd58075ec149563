use crate::http_handler::common::HTTPError;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::HTTPResponseType;
use reqwest::header::{CONTENT_TYPE, HeaderValue, InvalidHeaderName, InvalidHeaderValue};
use reqwest::multipart;
use std::io;
use std::path::{Path, PathBuf};
use strum_macros::Display;

/// HTTP verbs understood by the backend.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HTTPRequestMethod> for reqwest::Method {
    fn from(value: HTTPRequestMethod) -> Self {
        match value {
            HTTPRequestMethod::Get => reqwest::Method::GET,
            HTTPRequestMethod::Post => reqwest::Method::POST,
            HTTPRequestMethod::Put => reqwest::Method::PUT,
            HTTPRequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Payload attached to an outbound request.
///
/// Only `Json` and `Raw` set a `Content-Type` header. For `Multipart` the
/// header, including its boundary, is left to `reqwest`.
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Multipart(multipart::Form),
    Raw { content_type: HeaderValue, data: Vec<u8> },
}

impl RequestBody {
    /// Serializes `data` into a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(data: &T) -> Result<Self, RequestError> {
        Ok(RequestBody::Json(serde_json::to_vec(data)?))
    }

    pub fn raw(content_type: &str, data: Vec<u8>) -> Result<Self, RequestError> {
        Ok(RequestBody::Raw { content_type: HeaderValue::from_str(content_type)?, data })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Json(_) => "json",
            RequestBody::Multipart(_) => "multipart",
            RequestBody::Raw { .. } => "raw",
        }
    }

    pub(crate) fn attach(self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            RequestBody::Empty => request,
            RequestBody::Json(data) => request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(data),
            RequestBody::Multipart(form) => request.multipart(form),
            RequestBody::Raw { content_type, data } => {
                request.header(CONTENT_TYPE, content_type).body(data)
            }
        }
    }
}

/// Failures that happen before a request leaves the process.
#[derive(Debug, Display)]
pub enum RequestError {
    EmptyPath,
    /// A path parameter was empty, `.` or `..`.
    InvalidPathSegment(String),
    InvalidUrl(String),
    InvalidHeader(String),
    Serialization(String),
    File(io::Error),
    Build(String),
    InvalidConfig(String),
}

impl std::error::Error for RequestError {}

impl From<serde_json::Error> for RequestError {
    fn from(value: serde_json::Error) -> Self { RequestError::Serialization(value.to_string()) }
}

impl From<io::Error> for RequestError {
    fn from(value: io::Error) -> Self { RequestError::File(value) }
}

impl From<InvalidHeaderValue> for RequestError {
    fn from(value: InvalidHeaderValue) -> Self { RequestError::InvalidHeader(value.to_string()) }
}

impl From<InvalidHeaderName> for RequestError {
    fn from(value: InvalidHeaderName) -> Self { RequestError::InvalidHeader(value.to_string()) }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self { RequestError::Build(value.to_string()) }
}

/// An endpoint of the backend: where it lives, which verb it takes and what it answers.
pub trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// Path of the endpoint, with or without the API root.
    fn endpoint(&self) -> String;
    fn request_method(&self) -> HTTPRequestMethod;
}

#[allow(async_fn_in_trait)]
pub trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let method = self.request_method();
        let endpoint = checked_endpoint(self, client)?;
        client.send::<Self::Response>(method, &endpoint, RequestBody::Empty).await
    }
}

#[allow(async_fn_in_trait)]
pub trait JSONBodyHTTPRequestType: HTTPRequestType {
    /// The type of the json body.
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let method = self.request_method();
        let endpoint = checked_endpoint(self, client)?;
        let body = RequestBody::json(self.body())
            .map_err(|err| client.report(method, &endpoint, err.into()))?;
        client.send::<Self::Response>(method, &endpoint, body).await
    }
}

#[allow(async_fn_in_trait)]
pub trait MultipartBodyHTTPRequestType: HTTPRequestType {
    async fn body(&self) -> Result<multipart::Form, RequestError>;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let method = self.request_method();
        let endpoint = checked_endpoint(self, client)?;
        let form = self.body().await.map_err(|err| client.report(method, &endpoint, err.into()))?;
        client.send::<Self::Response>(method, &endpoint, RequestBody::Multipart(form)).await
    }
}

/// A file to be sent as one part of a multipart upload.
#[derive(Debug, Clone)]
pub enum UploadFile {
    /// Streamed from disk when the request is sent.
    Path(PathBuf),
    /// Already in memory.
    Bytes { file_name: String, data: Vec<u8> },
}

impl UploadFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "File path does not exist"));
        }
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "Path is not a valid file"));
        }
        Ok(UploadFile::Path(path.to_path_buf()))
    }

    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        UploadFile::Bytes { file_name: file_name.into(), data }
    }

    pub fn file_name(&self) -> Option<String> {
        match self {
            UploadFile::Path(path) => {
                path.file_name().map(|name| name.to_string_lossy().into_owned())
            }
            UploadFile::Bytes { file_name, .. } => Some(file_name.clone()),
        }
    }

    pub(crate) async fn to_part(&self) -> Result<multipart::Part, RequestError> {
        match self {
            UploadFile::Path(path) => Ok(multipart::Part::file(path).await?),
            UploadFile::Bytes { file_name, data } => {
                Ok(multipart::Part::bytes(data.clone()).file_name(file_name.clone()))
            }
        }
    }
}

/// Percent-encodes a single path segment, so ids cannot escape their slot in an endpoint.
///
/// `.` and `..` are written as `%2E` and `%2E%2E`; [`checked_endpoint`] refuses to
/// send them, since URL parsing would still resolve them as dot segments.
pub(crate) fn path_segment(segment: &str) -> String {
    match segment {
        "." => return String::from("%2E"),
        ".." => return String::from("%2E%2E"),
        _ => {}
    }
    let Ok(mut scratch) = reqwest::Url::parse("http://segment.invalid/") else {
        return segment.to_owned();
    };
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(segment);
    }
    scratch.path().trim_start_matches('/').to_owned()
}

/// Like [`path_segment`], but keeps `/` separators of a relative file path.
pub(crate) fn path_segments(path: &str) -> String {
    path.trim_start_matches('/').split('/').map(path_segment).collect::<Vec<_>>().join("/")
}

/// Finds an empty or dot segment in the path part of a typed endpoint.
pub(crate) fn invalid_segment(endpoint: &str) -> Option<&str> {
    let path = endpoint.split(['?', '#']).next().unwrap_or_default();
    path.strip_prefix('/').unwrap_or(path).split('/').find(|segment| {
        segment.is_empty()
            || segment.eq_ignore_ascii_case("%2e")
            || segment.eq_ignore_ascii_case("%2e%2e")
    })
}

/// The endpoint of a typed request, refused before sending if a path parameter was unusable.
fn checked_endpoint<T: HTTPRequestType + ?Sized>(
    request: &T,
    client: &HTTPClient,
) -> Result<String, HTTPError> {
    let endpoint = request.endpoint();
    match invalid_segment(&endpoint) {
        None => Ok(endpoint),
        Some(segment) => {
            let err = RequestError::InvalidPathSegment(format!("{segment:?} in {endpoint}"));
            Err(client.report(request.request_method(), &endpoint, err.into()))
        }
    }
}
