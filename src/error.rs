//! Error taxonomy for SparkPost API calls.
//!
//! Server-reported failures are classified by HTTP status into a closed set of
//! variants, each carrying the [`ApiError`] with the individual error items and
//! any partial `results` payload the server returned alongside them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Errors returned by the SparkPost client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client was misconfigured, or a call was made with an unsupported argument.
    ///
    /// `method` is set when the offending argument was the HTTP verb.
    #[error("{message}")]
    InvalidConfiguration {
        message: String,
        method: Option<String>,
    },

    /// The API answered `400 Bad Request`.
    #[error("{0}")]
    BadRequest(ApiError),

    /// The API answered `404 Not Found`.
    #[error("{0}")]
    NotFound(ApiError),

    /// The API answered `422`, or any status without a more specific mapping.
    #[error("{0}")]
    UnprocessableEntity(ApiError),

    /// The API rejected the call for rate limiting (`420` or `429`).
    #[error("{0}")]
    ThrottleLimitExceeded(ApiError),

    /// The request timed out in transport, or the API answered `504`.
    ///
    /// `status` is `None` when the timeout happened before any response arrived.
    #[error("{message}")]
    GatewayTimeoutExceeded { message: String, status: Option<u16> },

    /// Transport failure other than a timeout (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A non-empty response body was not valid JSON, or a request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify a failed response by its HTTP status.
    ///
    /// Unmapped statuses fall back to [`Error::UnprocessableEntity`].
    pub fn from_status(status: u16, errors: Vec<ErrorItem>, results: Option<Value>) -> Self {
        let api = ApiError::new(status, errors, results);
        match status {
            400 => Error::BadRequest(api),
            404 => Error::NotFound(api),
            420 | 429 => Error::ThrottleLimitExceeded(api),
            _ => Error::UnprocessableEntity(api),
        }
    }

    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
            method: None,
        }
    }

    pub(crate) fn unsupported_method(method: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: "Only GET, POST, PUT and DELETE are supported".to_string(),
            method: Some(method.into()),
        }
    }

    pub(crate) fn gateway_timeout(status: Option<u16>) -> Self {
        let message = match status {
            Some(status) => format!("Received {status} from SparkPost API"),
            None => "Request to SparkPost API timed out".to_string(),
        };
        Error::GatewayTimeoutExceeded { message, status }
    }

    /// Map a reqwest failure, turning timeouts into [`Error::GatewayTimeoutExceeded`].
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::gateway_timeout(None)
        } else {
            Error::Request(err)
        }
    }

    /// The server-reported failure, if this error came from an API response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::BadRequest(api)
            | Error::NotFound(api)
            | Error::UnprocessableEntity(api)
            | Error::ThrottleLimitExceeded(api) => Some(api),
            _ => None,
        }
    }

    /// HTTP status associated with the error, when one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::GatewayTimeoutExceeded { status, .. } => *status,
            Error::Request(err) => err.status().map(|s| s.as_u16()),
            other => other.api_error().map(ApiError::status),
        }
    }

    /// Partial `results` the server returned alongside its errors.
    ///
    /// A transmission with some rejected recipients still reports its id here.
    pub fn results(&self) -> Option<&Value> {
        self.api_error().and_then(ApiError::results)
    }

    /// Whether the server signaled rate limiting.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Error::ThrottleLimitExceeded(_))
    }
}

/// A failed API response: status, the reported error items and any partial results.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: u16,
    errors: Vec<ErrorItem>,
    results: Option<Value>,
}

impl ApiError {
    pub fn new(status: u16, errors: Vec<ErrorItem>, results: Option<Value>) -> Self {
        Self {
            status,
            errors,
            results,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Error items in the order the server reported them.
    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }

    pub fn results(&self) -> Option<&Value> {
        self.results.as_ref()
    }

    pub fn into_results(self) -> Option<Value> {
        self.results
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.write_with_status(f, self.status)?;
        }
        Ok(())
    }
}

/// One entry of the `errors` array in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub message: String,
    /// The API sends codes as strings or numbers; both end up here as text.
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ErrorItem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse the `errors` field of a response body.
    ///
    /// Entries that are bare strings become items with only a message.
    pub fn list_from(errors: &Value) -> Vec<ErrorItem> {
        match errors {
            Value::Array(items) => items.iter().map(Self::from_value).collect(),
            Value::Null => Vec::new(),
            other => vec![Self::from_value(other)],
        }
    }

    fn from_value(value: &Value) -> ErrorItem {
        match value {
            Value::String(message) => ErrorItem::new(message.clone()),
            other => ErrorItem::deserialize(other)
                .unwrap_or_else(|_| ErrorItem::new(other.to_string())),
        }
    }

    // "<message> <status> (Error Code: <code>)[: <description>]"
    fn write_with_status(&self, f: &mut fmt::Formatter<'_>, status: u16) -> fmt::Result {
        write!(f, "{} {}", self.message, status)?;
        if let Some(code) = &self.code {
            write!(f, " (Error Code: {code})")?;
        }
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

fn code_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(code)) => Some(code),
        Some(other) => Some(other.to_string()),
    })
}
