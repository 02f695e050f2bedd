//! Request and response shapes passed through [`Client::call`](crate::Client::call).

use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// HTTP verbs the SparkPost API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Case-insensitive. Anything outside GET/POST/PUT/DELETE is
    /// [`Error::InvalidConfiguration`] naming the verb.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::unsupported_method(s)),
        }
    }
}

impl TryFrom<reqwest::Method> for Method {
    type Error = Error;

    fn try_from(method: reqwest::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

/// Description of one API call.
///
/// `path` is appended verbatim to the configured base path. Defaults: no body,
/// no query, `extract_results = true`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub extract_results: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            extract_results: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Set the JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` and set it as the JSON body.
    pub fn json_body<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    /// Append a query parameter. Strings, booleans and numbers all render via `ToString`.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when `value` is `Some`.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Return the whole parsed body instead of its `results` field.
    pub fn extract_results(mut self, extract: bool) -> Self {
        self.extract_results = extract;
        self
    }

    /// The body to put on the wire: `None` for no body, JSON `null`, `{}` or `[]`.
    pub(crate) fn wire_body(&self) -> Option<&Value> {
        self.body.as_ref().filter(|body| match body {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        })
    }
}

/// Raw outcome of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
