//! Asynchronous API client for the SCOT-Web dashboard backend.
//!
//! Every call goes through one shared [`HTTPClient`], which resolves paths against
//! the configured API root, injects default headers and turns every failure into
//! a single [`HTTPError`]. Typed per-endpoint requests live in
//! [`http_handler::http_request`] and are sent with `send_request`.

pub mod logger;
pub mod http_handler;

pub use http_handler::{
    client_config::ClientConfig,
    common::{ErrorCategory, HTTPError},
    http_client::HTTPClient,
    http_request::request_common::{
        HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, MultipartBodyHTTPRequestType,
        NoBodyHTTPRequestType, RequestBody,
    },
    http_response::response_common::ApiPayload,
};
