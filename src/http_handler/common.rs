use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::{Display, EnumString};

/// Coarse classification of every failure the client can produce.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCategory {
    /// A response arrived, but its status was outside 2xx.
    ServerError,
    /// The request went out but no response came back (refused, reset, timed out).
    NetworkError,
    /// The request could not be built or sent, or a response could not be decoded locally.
    ClientError,
}

/// The single error shape returned by every client operation.
///
/// Transport errors never cross this boundary; they are folded into a
/// category, a human-readable message and, for server errors, the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HTTPError {
    category: ErrorCategory,
    message: String,
    status: Option<u16>,
}

impl HTTPError {
    pub(crate) fn server(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("HTTP error! status: {status} - {detail}"),
            None => format!("HTTP error! status: {status}"),
        };
        Self { category: ErrorCategory::ServerError, message, status: Some(status) }
    }

    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self { category: ErrorCategory::NetworkError, message: message.into(), status: None }
    }

    pub(crate) fn client(message: impl Into<String>) -> Self {
        Self { category: ErrorCategory::ClientError, message: message.into(), status: None }
    }

    pub fn category(&self) -> ErrorCategory { self.category }
    pub fn message(&self) -> &str { &self.message }
    /// HTTP status of the failed response, only set for server errors.
    pub fn status(&self) -> Option<u16> { self.status }
    pub fn is_server_error(&self) -> bool { self.category == ErrorCategory::ServerError }
    pub fn is_network_error(&self) -> bool { self.category == ErrorCategory::NetworkError }
    pub fn is_client_error(&self) -> bool { self.category == ErrorCategory::ClientError }
    pub fn is_not_found(&self) -> bool { self.status == Some(404) }
}

impl std::fmt::Display for HTTPError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

impl std::error::Error for HTTPError {}

impl From<RequestError> for HTTPError {
    fn from(value: RequestError) -> Self {
        let message = match value {
            RequestError::EmptyPath => String::from("Request path must not be empty"),
            RequestError::InvalidPathSegment(segment) => {
                format!("Invalid path parameter: {segment}")
            }
            RequestError::InvalidUrl(url) => format!("Invalid request URL: {url}"),
            RequestError::InvalidHeader(cause) => format!("Invalid request header: {cause}"),
            RequestError::Serialization(cause) => {
                format!("Failed to serialize request body: {cause}")
            }
            RequestError::File(cause) => format!("Failed to read upload file: {cause}"),
            RequestError::Build(cause) => format!("Failed to build request: {cause}"),
            RequestError::InvalidConfig(cause) => format!("Invalid client configuration: {cause}"),
        };
        HTTPError::client(message)
    }
}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self {
        match value {
            ResponseError::Status { status, detail } => HTTPError::server(status, detail.as_deref()),
            ResponseError::Timeout(Some(after)) => {
                HTTPError::network(format!("Network error: request timed out after {after:?}"))
            }
            ResponseError::Timeout(None) => HTTPError::network("Network error: request timed out"),
            ResponseError::NoConnection(Some(url)) => {
                HTTPError::network(format!("Network error: unable to reach server ({url})"))
            }
            ResponseError::NoConnection(None) => {
                HTTPError::network("Network error: unable to reach server")
            }
            ResponseError::Transport(cause) => HTTPError::network(format!("Network error: {cause}")),
            ResponseError::Decode(cause) => {
                HTTPError::client(format!("Failed to decode response body: {cause}"))
            }
            ResponseError::Io(cause) => HTTPError::client(format!("Failed to store response: {cause}")),
        }
    }
}
