use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;
use std::pin::Pin;
use std::time::Duration;
use strum_macros::Display;

/// Longest server-supplied plain-text detail kept in an error message.
const MAX_TEXT_DETAIL_CHARS: usize = 200;

#[allow(async_fn_in_trait)]
pub trait HTTPResponseType {
    type ParsedResponseType;

    /// Turns a successful (2xx) response into the parsed value.
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ResponseError::Status { status: status.as_u16(), detail: extract_detail(&body) })
    }
}

#[allow(async_fn_in_trait)]
pub trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: serde::de::DeserializeOwned {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Marker for response structs that are deserialized straight from the JSON body.
pub trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T where T: SerdeJSONBodyHTTPResponseType + serde::de::DeserializeOwned {}

impl<T> HTTPResponseType for T
where T: SerdeJSONBodyHTTPResponseType + serde::de::DeserializeOwned
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Self::parse_json_body(response).await
    }
}

/// Body of an untyped call: JSON when the server says so, text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Json(serde_json::Value),
    Text(String),
}

impl ApiPayload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ApiPayload::Json(value) => Some(value),
            ApiPayload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiPayload::Json(_) => None,
            ApiPayload::Text(text) => Some(text),
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ApiPayload::Json(value) => Some(value),
            ApiPayload::Text(_) => None,
        }
    }
}

/// Response type of the untyped `get`/`post`/`put`/`delete` calls.
pub struct JsonOrTextResponse {}

impl HTTPResponseType for JsonOrTextResponse {
    type ParsedResponseType = ApiPayload;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);
        if is_json {
            let body = response.bytes().await?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(ApiPayload::Json(serde_json::Value::Null));
            }
            Ok(ApiPayload::Json(serde_json::from_slice(&body)?))
        } else {
            Ok(ApiPayload::Text(response.text().await?))
        }
    }
}

/// Text bodies such as rendered HTML previews.
pub struct TextResponse {}

impl HTTPResponseType for TextResponse {
    type ParsedResponseType = String;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Ok(response.text().await?)
    }
}

/// Downloads, returned exactly as received.
pub struct RawBytesResponse {}

impl HTTPResponseType for RawBytesResponse {
    type ParsedResponseType = Vec<u8>;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Ok(response.bytes().await?.to_vec())
    }
}

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ResponseError>> + Send>>;

/// Downloads consumed chunk by chunk.
pub struct ByteStreamResponse {}

impl HTTPResponseType for ByteStreamResponse {
    type ParsedResponseType = ByteStream;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Ok(Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(ResponseError::from))))
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Error body as sent by the backend (`{"detail": ...}`), or a generic `{"message": ...}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Validation(Vec<ValidationDetail>),
    Other(serde_json::Value),
}

/// One entry of a request validation failure (status 422).
#[derive(Debug, serde::Deserialize)]
struct ValidationDetail {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl ValidationDetail {
    fn describe(&self) -> String {
        if self.loc.is_empty() {
            return self.msg.clone();
        }
        let loc = self
            .loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(name) => name.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        format!("{loc}: {}", self.msg)
    }
}

/// Pulls a human-readable detail out of an error response body.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
        let detail = match parsed.detail {
            Some(ErrorDetail::Text(text)) => Some(text),
            Some(ErrorDetail::Validation(entries)) if !entries.is_empty() => {
                Some(entries.iter().map(ValidationDetail::describe).collect::<Vec<_>>().join("; "))
            }
            Some(ErrorDetail::Other(serde_json::Value::Null)) | None => None,
            Some(ErrorDetail::Validation(_)) => None,
            Some(ErrorDetail::Other(value)) => Some(value.to_string()),
        };
        if let Some(detail) = detail.or(parsed.message) {
            return Some(detail);
        }
        // a JSON object without a usable field: fall through to the raw text
    }
    Some(trimmed.chars().take(MAX_TEXT_DETAIL_CHARS).collect())
}

/// Failures observed on the way back: status, transport and decoding.
#[derive(Debug, Display)]
pub enum ResponseError {
    Status { status: u16, detail: Option<String> },
    Timeout(Option<Duration>),
    NoConnection(Option<String>),
    Transport(String),
    Decode(String),
    Io(String),
}

impl ResponseError {
    /// Like `From<reqwest::Error>`, but names the configured timeout.
    pub(crate) fn from_transport(value: reqwest::Error, timeout: Duration) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout(Some(timeout))
        } else {
            ResponseError::from(value)
        }
    }
}

impl std::error::Error for ResponseError {}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout(None)
        } else if value.is_connect() {
            ResponseError::NoConnection(value.url().map(ToString::to_string))
        } else if value.is_decode() {
            ResponseError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            ResponseError::Status { status: status.as_u16(), detail: None }
        } else {
            ResponseError::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(value: serde_json::Error) -> Self { ResponseError::Decode(value.to_string()) }
}

impl From<std::io::Error> for ResponseError {
    fn from(value: std::io::Error) -> Self { ResponseError::Io(value.to_string()) }
}
