use super::client_config::ClientConfig;
use super::common::HTTPError;
use super::http_request::request_common::{HTTPRequestMethod, RequestBody, RequestError};
use super::http_response::response_common::{
    ApiPayload, ByteStream, ByteStreamResponse, HTTPResponseType, JsonOrTextResponse,
    RawBytesResponse, ResponseError,
};
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// A wrapper around `reqwest::Client` that every call to the backend goes through.
///
/// The client is built once from a [`ClientConfig`] and shared (usually behind an
/// `Arc`) for the lifetime of the application. It carries no per-request state:
/// each call resolves its path against the API root, sends, checks the status and
/// decodes the body on its own. Every failure comes back as an [`HTTPError`].
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` holding timeout, default headers and the connection pool.
    client: reqwest::Client,
    /// Scheme, host and port, prepended to every resolved path.
    base_url: String,
    /// Prefix every request path must start with, e.g. `/api`.
    api_root: String,
    /// Overall per-request deadline, repeated in timeout messages.
    timeout: Duration,
}

impl HTTPClient {
    /// Builds the client.
    ///
    /// A `Content-Type` among the default headers is dropped, because the body of
    /// each request decides it (and multipart bodies need their own boundary).
    ///
    /// # Errors
    /// A client-error if the base URL does not parse or `reqwest` refuses the settings.
    pub fn new(config: ClientConfig) -> Result<HTTPClient, HTTPError> {
        let base = reqwest::Url::parse(config.base_url())
            .map_err(|err| RequestError::InvalidUrl(format!("{}: {err}", config.base_url())))?;
        if base.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(config.base_url().to_owned()).into());
        }
        let mut default_headers = config.default_headers().clone();
        if default_headers.remove(CONTENT_TYPE).is_some() {
            crate::warn!("Ignoring default Content-Type header, it is chosen per request body");
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()
            .map_err(RequestError::from)?;
        crate::log!(
            "API client for {}{} ready (timeout {:?})",
            config.base_url(),
            config.api_root(),
            config.timeout()
        );
        Ok(HTTPClient {
            client,
            base_url: config.base_url().to_owned(),
            api_root: config.api_root().to_owned(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str { self.base_url.as_str() }
    pub fn api_root(&self) -> &str { self.api_root.as_str() }
    pub fn timeout(&self) -> Duration { self.timeout }

    /// Prefixes `path` with the API root unless it already starts with it.
    ///
    /// `"prd/1"`, `"/prd/1"` and `"/api/prd/1"` all resolve to `"/api/prd/1"`.
    /// The root only counts as present when it is a whole segment, so with root
    /// `/api` the path `/apiary` becomes `/api/apiary`.
    ///
    /// # Errors
    /// Empty paths and absolute URLs are rejected.
    pub fn resolve_path(&self, path: &str) -> Result<String, RequestError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(RequestError::EmptyPath);
        }
        if has_scheme(path) {
            return Err(RequestError::InvalidUrl(format!("{path} is not a relative path")));
        }
        let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
        if self.api_root.is_empty() || has_root_prefix(&path, &self.api_root) {
            Ok(path)
        } else {
            Ok(format!("{}{path}", self.api_root))
        }
    }

    /// Full URL a request for `path` is sent to.
    ///
    /// # Errors
    /// See [`HTTPClient::resolve_path`].
    pub fn resolve_url(&self, path: &str) -> Result<String, RequestError> {
        Ok(format!("{}{}", self.base_url, self.resolve_path(path)?))
    }

    /// Issues a GET and returns the JSON document, or the text if the response is not JSON.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn get(&self, path: &str) -> Result<ApiPayload, HTTPError> {
        self.send::<JsonOrTextResponse>(HTTPRequestMethod::Get, path, RequestBody::Empty).await
    }

    /// Sends `data` as a JSON document (`Content-Type: application/json`).
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn post<T>(&self, path: &str, data: &T) -> Result<ApiPayload, HTTPError>
    where T: serde::Serialize + ?Sized {
        self.send_json(HTTPRequestMethod::Post, path, data).await
    }

    /// Sends a multipart form; `reqwest` writes the `Content-Type` with its boundary.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn post_form(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ApiPayload, HTTPError> {
        let body = RequestBody::Multipart(form);
        self.send::<JsonOrTextResponse>(HTTPRequestMethod::Post, path, body).await
    }

    /// Sends `data` unchanged with the given content type.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ApiPayload, HTTPError> {
        let body = RequestBody::raw(content_type, data)
            .map_err(|err| self.report(HTTPRequestMethod::Post, path, err.into()))?;
        self.send::<JsonOrTextResponse>(HTTPRequestMethod::Post, path, body).await
    }

    /// Same contract as [`HTTPClient::post`], with PUT.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn put<T>(&self, path: &str, data: &T) -> Result<ApiPayload, HTTPError>
    where T: serde::Serialize + ?Sized {
        self.send_json(HTTPRequestMethod::Put, path, data).await
    }

    /// Issues a DELETE without a body.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn delete(&self, path: &str) -> Result<ApiPayload, HTTPError> {
        self.send::<JsonOrTextResponse>(HTTPRequestMethod::Delete, path, RequestBody::Empty).await
    }

    /// Issues a GET and returns the body byte for byte, never parsed.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`].
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, HTTPError> {
        self.send::<RawBytesResponse>(HTTPRequestMethod::Get, path, RequestBody::Empty).await
    }

    /// Streams a download into `destination` and returns the number of bytes written.
    ///
    /// The body goes to a `.part` file next to `destination`, which is only renamed
    /// onto `destination` once the transfer is complete. A failed download leaves
    /// an existing file at `destination` untouched.
    ///
    /// # Errors
    /// Any failure, normalized into an [`HTTPError`]; local I/O problems are client-errors.
    pub async fn download_to_file<P: AsRef<Path>>(
        &self,
        path: &str,
        destination: P,
    ) -> Result<u64, HTTPError> {
        let stream =
            self.send::<ByteStreamResponse>(HTTPRequestMethod::Get, path, RequestBody::Empty).await?;
        let destination = destination.as_ref();
        let partial = partial_path(destination);
        let stored = match Self::write_stream(stream, &partial).await {
            Ok(written) => tokio::fs::rename(&partial, destination)
                .await
                .map(|()| written)
                .map_err(ResponseError::from),
            Err(err) => Err(err),
        };
        match stored {
            Ok(written) => {
                crate::event!("Stored {written} bytes from {path} in {}", destination.display());
                Ok(written)
            }
            Err(err) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        crate::warn!("Could not remove {}: {cleanup}", partial.display());
                    }
                }
                Err(self.report(HTTPRequestMethod::Get, path, self.name_timeout(err).into()))
            }
        }
    }

    /// The one routine every request goes through.
    pub(crate) async fn send<R: HTTPResponseType>(
        &self,
        method: HTTPRequestMethod,
        path: &str,
        body: RequestBody,
    ) -> Result<R::ParsedResponseType, HTTPError> {
        match self.round_trip::<R>(method, path, body).await {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(self.report(method, path, err)),
        }
    }

    /// Logs a normalized error and hands it back.
    pub(crate) fn report(&self, method: HTTPRequestMethod, path: &str, err: HTTPError) -> HTTPError {
        let target = self.resolve_url(path).unwrap_or_else(|_| path.to_owned());
        crate::warn!("{} on {method} {target}: {}", err.category(), err.message());
        err
    }

    async fn send_json<T>(
        &self,
        method: HTTPRequestMethod,
        path: &str,
        data: &T,
    ) -> Result<ApiPayload, HTTPError>
    where
        T: serde::Serialize + ?Sized,
    {
        let body = RequestBody::json(data).map_err(|err| self.report(method, path, err.into()))?;
        self.send::<JsonOrTextResponse>(method, path, body).await
    }

    async fn round_trip<R: HTTPResponseType>(
        &self,
        method: HTTPRequestMethod,
        path: &str,
        body: RequestBody,
    ) -> Result<R::ParsedResponseType, HTTPError> {
        let url = self.resolve_url(path)?;
        crate::event!("--> {method} {url} ({} body)", body.kind());
        let request = body.attach(self.client.request(method.into(), url.as_str()));
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) if err.is_builder() => return Err(RequestError::from(err).into()),
            Err(err) => return Err(ResponseError::from_transport(err, self.timeout).into()),
        };
        let status = response.status();
        let response = R::unwrap_return_code(response).await.map_err(|err| self.name_timeout(err))?;
        crate::event!("<-- {} {method} {url}", status.as_u16());
        Ok(R::read_response(response).await.map_err(|err| self.name_timeout(err))?)
    }

    /// Body reads only know that they timed out, not after how long.
    fn name_timeout(&self, err: ResponseError) -> ResponseError {
        match err {
            ResponseError::Timeout(None) => ResponseError::Timeout(Some(self.timeout)),
            other => other,
        }
    }

    async fn write_stream(mut stream: ByteStream, destination: &Path) -> Result<u64, ResponseError> {
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}

/// True for `scheme://...`, i.e. when `://` shows up before the first `/`, `?` or `#`.
fn has_scheme(path: &str) -> bool {
    let head = path.find(['/', '?', '#']).map_or(path, |end| &path[..end]);
    head.ends_with(':') && path[head.len()..].starts_with("//")
}

/// `site.zip` becomes `site.zip.part` in the same directory.
fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn has_root_prefix(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_root(root: &str) -> HTTPClient {
        HTTPClient::new(
            ClientConfig::default().with_base_url("http://localhost:8000/").with_api_root(root),
        )
        .unwrap()
    }

    #[test]
    fn unprefixed_paths_get_the_root() {
        let client = client_with_root("/api");
        assert_eq!(client.resolve_path("/prd/1").unwrap(), "/api/prd/1");
        assert_eq!(client.resolve_path("prd/1").unwrap(), "/api/prd/1");
        assert_eq!(client.resolve_path("/").unwrap(), "/api/");
    }

    #[test]
    fn prefixed_paths_are_not_doubled() {
        let client = client_with_root("/api");
        assert_eq!(client.resolve_path("/api/prd/1").unwrap(), "/api/prd/1");
        assert_eq!(client.resolve_path("api/prd").unwrap(), "/api/prd");
        assert_eq!(client.resolve_path("/api").unwrap(), "/api");
        assert_eq!(client.resolve_path("/api?x=1").unwrap(), "/api?x=1");
    }

    #[test]
    fn root_must_match_a_whole_segment() {
        let client = client_with_root("/api");
        assert_eq!(client.resolve_path("/apiary").unwrap(), "/api/apiary");
    }

    #[test]
    fn empty_root_leaves_paths_alone() {
        let client = client_with_root("");
        assert_eq!(client.resolve_path("logs").unwrap(), "/logs");
    }

    #[test]
    fn resolve_url_joins_base_and_path() {
        let client = client_with_root("/api");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.resolve_url("logs/7").unwrap(), "http://localhost:8000/api/logs/7");
    }

    #[test]
    fn empty_and_absolute_paths_are_rejected() {
        let client = client_with_root("/api");
        assert!(matches!(client.resolve_path(""), Err(RequestError::EmptyPath)));
        assert!(matches!(client.resolve_path("   "), Err(RequestError::EmptyPath)));
        assert!(matches!(
            client.resolve_path("http://elsewhere/api/prd"),
            Err(RequestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn urls_inside_the_query_are_not_absolute_paths() {
        let client = client_with_root("/api");
        assert_eq!(
            client.resolve_path("prd?ref=https://a.b").unwrap(),
            "/api/prd?ref=https://a.b"
        );
        assert_eq!(
            client.resolve_path("/inspect?src=http://example.com").unwrap(),
            "/api/inspect?src=http://example.com"
        );
        assert_eq!(client.resolve_path("logs#http://x").unwrap(), "/api/logs#http://x");
        assert!(matches!(client.resolve_path("https://a.b"), Err(RequestError::InvalidUrl(_))));
        assert!(matches!(client.resolve_path("ftp://a.b?x"), Err(RequestError::InvalidUrl(_))));
    }

    #[test]
    fn partial_download_sits_next_to_the_destination() {
        assert_eq!(
            partial_path(Path::new("/tmp/out/site.zip")),
            PathBuf::from("/tmp/out/site.zip.part")
        );
    }

    #[test]
    fn invalid_base_url_is_a_client_error() {
        let err = HTTPClient::new(ClientConfig::default().with_base_url("not a url")).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn default_content_type_is_dropped() {
        let config = ClientConfig::default()
            .with_default_header("Content-Type", "application/json")
            .unwrap();
        assert!(HTTPClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn empty_path_fails_before_sending() {
        let client = client_with_root("/api");
        let err = client.get("").await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.status(), None);
    }
}
