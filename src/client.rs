//! Authenticated HTTP client for the Zentral REST API.
//!
//! `Client` wraps a `reqwest::Client`, the parsed base URL and the
//! `Authorization` header value. It is immutable after construction and
//! cheap to clone, so a single instance can be shared across tasks.
//!
//! A call is split in two steps:
//!
//! 1. [`Client::new_request`] resolves a relative path against the base URL,
//!    serializes the optional JSON body and attaches the standard headers.
//!    No I/O happens here.
//! 2. [`Client::execute`] (or [`Client::fetch`]) sends the request, racing
//!    it against the caller's [`Context`], and translates the answer into a
//!    decoded value or a typed [`Error`].
//!
//! There is no retry logic. A transport failure is returned as-is and
//! callers that need resilience wrap calls themselves.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::context::Context;
use crate::error::{ApiError, Error, Result};

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("zentral-client-rs/", env!("CARGO_PKG_VERSION"));

/// Header carrying the total number of items of a paginated collection.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Connect timeout for the default transport. Covers TCP + TLS handshake.
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for the default transport.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the default transport used when the caller does not supply one.
pub(crate) fn build_http_client(
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

/// Status, headers and pagination metadata of one API response.
///
/// Returned by every successful call and attached to `Api` / `Decode`
/// errors, so the status code and headers are always inspectable once the
/// server has answered.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL of the request, after redirects.
    pub url: Option<Url>,
    /// Total size of the collection, when the server reported it.
    pub total_count: Option<u64>,
}

impl Response {
    fn new(status: StatusCode, headers: HeaderMap, url: Url) -> Self {
        let total_count = headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        Response {
            status,
            headers,
            url: Some(url),
            total_count,
        }
    }

    /// A response carrying only a status code. Useful for tests and for
    /// building `ApiError`s by hand.
    pub fn for_status(status: StatusCode) -> Self {
        Response {
            status,
            headers: HeaderMap::new(),
            url: None,
            total_count: None,
        }
    }
}

/// Authenticated client for the Zentral REST API.
///
/// - `base_url` always ends with `/`, so resource paths such as
///   `inventory/tags/` resolve underneath it instead of replacing its last
///   segment.
/// - `auth` is the pre-built `Token <value>` header, marked sensitive so it
///   never shows up in `reqwest` debug output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    auth: HeaderValue,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &"<redacted>")
            .finish()
    }
}

impl Client {
    /// Creates a client for `base_url`, authenticating with `token`.
    ///
    /// Pass `None` as `http` to use a default transport with a 10 s connect
    /// timeout and a 60 s request timeout.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the base URL does not parse, cannot be a base, or
    /// does not end with a trailing slash, or if the token contains bytes
    /// that are not allowed in an HTTP header.
    pub fn new(http: Option<reqwest::Client>, base_url: &str, token: &str) -> Result<Self> {
        if !base_url.ends_with('/') {
            return Err(Error::Config(format!(
                "base URL must have a trailing slash, but {base_url:?} does not"
            )));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL {base_url} cannot be used as a base"
            )));
        }
        if !base_url.path().ends_with('/') {
            return Err(Error::Config(format!(
                "base URL must have a trailing slash, but {base_url} does not"
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|_| Error::Config("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let http = match http {
            Some(http) => http,
            None => build_http_client(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)?,
        };

        Ok(Client {
            http,
            base_url,
            auth,
        })
    }

    /// The base URL every resource path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an authenticated request without sending it.
    ///
    /// `path` is resolved relative to the base URL. When `body` is present
    /// it is serialized as JSON and `Content-Type: application/json` is set.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPath`: `path` does not resolve against the base URL.
    /// - `Error::Encode`: `body` failed to serialize.
    /// - `Error::Request`: `reqwest` rejected the assembled request.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request> {
        let url = self.base_url.join(path).map_err(|source| Error::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        let mut req = self
            .http
            .request(method, url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(AUTHORIZATION, self.auth.clone())
            .header(USER_AGENT, USER_AGENT_VALUE);
        if let Some(payload) = body {
            let encoded = serde_json::to_vec(payload).map_err(Error::Encode)?;
            req = req.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(encoded);
        }

        req.build().map_err(Error::Request)
    }

    /// Sends `req` and decodes a 2xx JSON body into `dest`.
    ///
    /// - An empty 2xx body (e.g. `204 No Content`) leaves `dest` untouched.
    /// - A body that does not decode yields `Error::Decode`.
    /// - A non-2xx status yields `Error::Api`.
    ///
    /// The returned [`Response`] carries the status, headers and pagination
    /// metadata.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        req: reqwest::Request,
        dest: Option<&mut T>,
    ) -> Result<Response> {
        let (body, response) = self.send(ctx, req).await?;
        if let Some(dest) = dest {
            if !is_blank(&body) {
                *dest = decode(&body, &response)?;
            }
        }
        Ok(response)
    }

    /// Sends `req` and decodes the 2xx JSON body as `T`.
    ///
    /// Unlike [`Client::execute`], an empty body is a decode error because a
    /// value was expected.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        req: reqwest::Request,
    ) -> Result<(T, Response)> {
        let (body, response) = self.send(ctx, req).await?;
        let value = decode(&body, &response)?;
        Ok((value, response))
    }

    /// Sends the request, reads the whole body and maps non-2xx statuses to
    /// `ApiError`. Both the send and the body read honor `ctx`.
    async fn send(&self, ctx: &Context, req: reqwest::Request) -> Result<(Bytes, Response)> {
        let method = req.method().clone();
        let url = req.url().clone();
        debug!(%method, %url, "sending request");

        let resp = ctx
            .run(async { self.http.execute(req).await.map_err(Error::Transport) })
            .await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let final_url = resp.url().clone();
        let body = ctx
            .run(async { resp.bytes().await.map_err(Error::Transport) })
            .await?;
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "received response");

        let response = Response::new(status, headers, final_url);
        if !status.is_success() {
            let err = ApiError::from_body(response, &body);
            warn!(%method, %url, status = status.as_u16(), message = %err.message, "API error");
            return Err(err.into());
        }
        Ok((body, response))
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn decode<T: DeserializeOwned>(body: &[u8], response: &Response) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        response: Box::new(response.clone()),
        source,
    })
}
