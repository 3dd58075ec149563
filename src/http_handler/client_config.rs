use super::http_request::request_common::RequestError;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

pub const BASE_URL_VAR: &str = "SCOT_BASE_URL";
pub const API_ROOT_VAR: &str = "SCOT_API_ROOT";
pub const TIMEOUT_VAR: &str = "SCOT_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_ROOT: &str = "/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";

/// Fixed settings of an [`HTTPClient`](super::http_client::HTTPClient), applied once at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, without a trailing slash.
    base_url: String,
    /// Prefix every request path is resolved against, e.g. `/api`. May be empty.
    api_root: String,
    /// Overall deadline of a single request, connect to last body byte.
    timeout: Duration,
    /// Sent with every request unless the request sets the same header itself.
    default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_root: String::from(DEFAULT_API_ROOT),
            timeout: DEFAULT_TIMEOUT,
            default_headers,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `SCOT_BASE_URL`, `SCOT_API_ROOT` and `SCOT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, RequestError>
    where F: Fn(&str) -> Option<String> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config = config.with_base_url(&base_url);
        }
        if let Some(api_root) = lookup(API_ROOT_VAR) {
            config = config.with_api_root(&api_root);
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            let parsed = timeout
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| {
                    RequestError::InvalidConfig(format!(
                        "{TIMEOUT_VAR}={timeout} is not a positive number of seconds"
                    ))
                })?;
            config = config.with_timeout(parsed);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = normalize_root(api_root);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_header(mut self, name: &str, value: &str) -> Result<Self, RequestError> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &str { &self.base_url }
    pub fn api_root(&self) -> &str { &self.api_root }
    pub fn timeout(&self) -> Duration { self.timeout }
    pub fn default_headers(&self) -> &HeaderMap { &self.default_headers }
}

/// `"api/"`, `"/api"` and `"//api//"` all become `"/api"`; `""` and `"/"` become `""`.
fn normalize_root(api_root: &str) -> String {
    let trimmed = api_root.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}
