//! Typed error hierarchy for the zentral-client crate.
//!
//! Every public operation returns [`Result`], and every failure falls into
//! one of the variants of [`Error`]. The variants map to the boundary where
//! the failure happened:
//!
//! - `Config`: the client could not be constructed (bad base URL, token
//!   that cannot be sent as a header).
//! - `Arg`: a caller-supplied argument was rejected before any network I/O.
//! - `InvalidPath`, `Encode` and `Request`: the request could not be built.
//! - `Transport`, `Cancelled`, `DeadlineExceeded`: the request never
//!   produced an HTTP status.
//! - `Decode`: the server answered 2xx but the body was not the expected
//!   JSON shape.
//! - `Api`: the server answered with a non-2xx status.
//!
//! `Decode` and `Api` keep the [`Response`] so callers can inspect the status
//! code and headers even on failure.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

use crate::client::Response;

/// Unified error type for all zentral-client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid client construction input.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Client-side validation failure. Raised before any network call.
    #[error(transparent)]
    Arg(#[from] ArgError),

    /// The relative resource path could not be resolved against the base URL.
    #[error("cannot resolve path {path:?} against the base URL: {source}")]
    InvalidPath {
        /// The relative path that failed to resolve.
        path: String,
        /// The underlying URL parse error.
        #[source]
        source: url::ParseError,
    },

    /// A request body or list options value could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// `reqwest` rejected the assembled request before it was sent.
    #[error("failed to build request: {0}")]
    Request(#[source] reqwest::Error),

    /// A network-level failure (DNS, connection refused, TLS, transport
    /// timeout). The `reqwest::Error` is passed through unchanged.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller cancelled the [`Context`](crate::context::Context) while
    /// the request was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// The [`Context`](crate::context::Context) deadline elapsed while the
    /// request was in flight.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// The server answered 2xx but the body did not decode.
    #[error("failed to decode response ({}): {source}", .response.status)]
    Decode {
        /// Status and headers of the response whose body failed to decode.
        response: Box<Response>,
        /// The serde error describing the shape mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Api(Box<ApiError>),
}

impl Error {
    /// Returns the HTTP response attached to this error, if any.
    ///
    /// Only `Api` and `Decode` errors carry one; every other variant failed
    /// before a response was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api(api) => Some(&api.response),
            Error::Decode { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// Returns the HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// True when the server answered `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(Box::new(err))
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Client-side argument validation failure.
///
/// Resource services build these before constructing a request, so an
/// `ArgError` guarantees that no network call was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument {parameter}: {reason}")]
pub struct ArgError {
    /// Name of the offending parameter (e.g. `"id"`, `"name"`).
    pub parameter: String,
    /// Human-readable reason the value was rejected.
    pub reason: String,
}

impl ArgError {
    /// Creates a new argument error.
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        ArgError {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// A non-2xx answer from the Zentral API.
///
/// `message` is the top-level human-readable error. `field_errors` holds
/// per-field validation detail (e.g. `{"name": ["cannot be blank"]}`) when
/// the server returned a structured payload.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Status, headers and URL of the failed response.
    pub response: Response,
    /// Top-level error message.
    pub message: String,
    /// Per-field validation errors, keyed by wire field name.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

/// Keys whose string value is the top-level message of an error payload.
const MESSAGE_KEYS: [&str; 3] = ["detail", "message", "error"];

/// Key holding validation errors that are not tied to a single field.
const NON_FIELD_ERRORS: &str = "non_field_errors";

impl ApiError {
    /// Builds an `ApiError` from a response and its raw body.
    ///
    /// Structured JSON payloads are split into a message and field errors.
    /// Anything that does not parse as JSON falls back to the raw body text.
    pub fn from_body(response: Response, body: &[u8]) -> Self {
        let mut message = String::new();
        let mut field_errors = BTreeMap::new();

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => {
                let mut non_field = Vec::new();
                for (key, value) in map {
                    if MESSAGE_KEYS.contains(&key.as_str()) {
                        if let Value::String(s) = &value {
                            if message.is_empty() {
                                message = s.clone();
                            }
                            continue;
                        }
                    }
                    let Some(errors) = string_list(&value) else {
                        continue;
                    };
                    if key == NON_FIELD_ERRORS {
                        non_field.extend(errors);
                    } else {
                        field_errors.insert(key, errors);
                    }
                }
                if !non_field.is_empty() {
                    if !message.is_empty() {
                        message.push_str(": ");
                    }
                    message.push_str(&non_field.join("; "));
                }
            }
            Ok(value) => {
                if let Some(errors) = string_list(&value) {
                    message = errors.join("; ");
                }
            }
            Err(_) => {
                message = String::from_utf8_lossy(body).trim().to_string();
            }
        }

        if message.is_empty() && field_errors.is_empty() {
            message = String::from_utf8_lossy(body).trim().to_string();
        }
        if message.is_empty() {
            message = match response.status.canonical_reason() {
                Some(reason) => reason.to_string(),
                None => "request failed".to_string(),
            };
        }

        ApiError {
            response,
            message,
            field_errors,
        }
    }

    /// HTTP status code of the failed response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.response.status, self.message)?;
        for (field, errors) in &self.field_errors {
            write!(f, "; {field}: {}", errors.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Reads a JSON string or list of strings as a list of messages.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => None,
    }
}
