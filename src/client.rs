//! SparkPost async client: configuration, request pipeline and response normalization.

use crate::endpoints::{
    Account, Events, InboundDomains, MessageEvents, Metrics, RecipientLists, RelayWebhooks,
    SendingDomains, Subaccounts, SuppressionList, Templates, Transmissions, Webhooks,
};
use crate::{Error, ErrorItem, Method, RequestSpec, ResponseEnvelope, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Public SparkPost API endpoint.
pub const DEFAULT_API_HOST: &str = "https://api.sparkpost.com";
/// Prefix prepended to every request path.
pub const DEFAULT_BASE_PATH: &str = "/api/v1/";

const API_KEY_ENV: &str = "SPARKPOST_API_KEY";
const API_HOST_ENV: &str = "SPARKPOST_API_HOST";
const SUBACCOUNT_HEADER: &str = "x-msys-subaccount";
const USER_AGENT_VALUE: &str = concat!("simple_spark/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Everything outside [A-Za-z0-9_.-] is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-');

/// Percent-encode a caller-supplied identifier for use as one URL path segment.
///
/// Every byte outside `[A-Za-z0-9_.-]` becomes `%XX` with uppercase hex; a
/// space is `%20`, never `+`.
///
/// ```
/// assert_eq!(simple_spark::url_encode("a b"), "a%20b");
/// assert_eq!(simple_spark::url_encode("me@example.com"), "me%40example.com");
/// ```
pub fn url_encode(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Interpret a raw response.
///
/// - `204`, or an empty body with any other status (logged as a warning), yields `{}`.
/// - A body with an `errors` field is classified into an [`Error`], keeping any `results`.
/// - Otherwise the `results` field (or `{}` if absent) is returned, or the whole
///   body when `extract_results` is false.
pub fn normalize_response(response: &ResponseEnvelope, extract_results: bool) -> Result<Value> {
    if response.status == 204 {
        return Ok(empty_result());
    }
    if response.body.trim().is_empty() {
        tracing::warn!(
            status = response.status,
            "SparkPost returned an empty body for a non-204 response"
        );
        return Ok(empty_result());
    }

    let mut body: Value = serde_json::from_str(&response.body)?;
    if let Some(errors) = body.get("errors") {
        let items = ErrorItem::list_from(errors);
        let results = body.get("results").filter(|r| !r.is_null()).cloned();
        return Err(Error::from_status(response.status, items, results));
    }

    if !extract_results {
        return Ok(body);
    }
    match body.get_mut("results").map(Value::take) {
        Some(results) if !results.is_null() => Ok(results),
        _ => Ok(empty_result()),
    }
}

fn empty_result() -> Value {
    Value::Object(Map::new())
}

/// Resolved, immutable client settings.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    api_host: String,
    base_path: String,
    subaccount: Option<String>,
    headers: Vec<(String, String)>,
    debug: bool,
    timeout: Duration,
}

impl ClientConfig {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn subaccount(&self) -> Option<&str> {
        self.subaccount.as_deref()
    }

    /// Caller-supplied header overrides, in the order they were added.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("base_path", &self.base_path)
            .field("subaccount", &self.subaccount)
            .field("headers", &self.headers)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build the request headers in precedence order: defaults, then the
/// subaccount header, then caller overrides. Later entries win.
fn compose_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
        Error::invalid_configuration("The SparkPost API key is not a valid header value")
    })?;
    api_key.set_sensitive(true);
    headers.insert(AUTHORIZATION, api_key);

    if let Some(subaccount) = &config.subaccount {
        let value = HeaderValue::from_str(subaccount).map_err(|_| {
            Error::invalid_configuration("The subaccount id is not a valid header value")
        })?;
        headers.insert(HeaderName::from_static(SUBACCOUNT_HEADER), value);
    }

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            Error::invalid_configuration(format!("Invalid header name in overrides: {name:?}"))
        })?;
        let mut value = HeaderValue::from_str(value).map_err(|_| {
            Error::invalid_configuration(format!("Invalid value for header {name} in overrides"))
        })?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Async client for the SparkPost API.
///
/// Use [`Client::new`] with an API key, [`Client::from_env`], or
/// [`Client::builder`] for hosts, subaccounts, extra headers and transport
/// settings. The client is cheap to share: resource accessors such as
/// [`Client::transmissions`] borrow it.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    headers: HeaderMap,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public endpoint with the given API key.
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let account = client.account().retrieve(None).await?;
    /// println!("{account}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client configured from `SPARKPOST_API_KEY` (and optionally
    /// `SPARKPOST_API_HOST`).
    pub fn from_env() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and normalize its response.
    ///
    /// The path is `base_path + spec.path` with no slash normalization. A
    /// transport timeout and an HTTP `504` both surface as
    /// [`Error::GatewayTimeoutExceeded`]. Nothing is retried.
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::{Client, RequestSpec};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let links = client
    ///     .call(RequestSpec::get("metrics").extract_results(false))
    ///     .await?;
    /// println!("{}", links["links"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(&self, spec: RequestSpec) -> Result<Value> {
        let path = format!("{}{}", self.config.base_path, spec.path);
        let url = format!("{}{}", self.config.api_host, path);
        let body = spec.wire_body();

        if self.config.debug {
            tracing::debug!(
                method = %spec.method,
                path = %path,
                headers = ?self.headers,
                body = ?body,
                query = ?spec.query,
                "sending SparkPost request"
            );
        }

        let mut request = match spec.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        }
        .headers(self.headers.clone());

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }

        let response = request.send().await.map_err(Error::from_transport)?;
        let status = response.status().as_u16();
        let raw = response.text().await.map_err(Error::from_transport)?;

        if self.config.debug {
            tracing::debug!(status, response = %raw, "received SparkPost response");
        }

        if status == 504 {
            return Err(Error::gateway_timeout(Some(status)));
        }

        normalize_response(&ResponseEnvelope::new(status, raw), spec.extract_results)
    }

    /// Percent-encode an identifier for a path segment. See [`url_encode`].
    pub fn url_encode(&self, segment: &str) -> String {
        url_encode(segment)
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(self)
    }

    pub fn subaccounts(&self) -> Subaccounts<'_> {
        Subaccounts::new(self)
    }

    pub fn inbound_domains(&self) -> InboundDomains<'_> {
        InboundDomains::new(self)
    }

    pub fn sending_domains(&self) -> SendingDomains<'_> {
        SendingDomains::new(self)
    }

    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    pub fn transmissions(&self) -> Transmissions<'_> {
        Transmissions::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn message_events(&self) -> MessageEvents<'_> {
        MessageEvents::new(self)
    }

    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    pub fn relay_webhooks(&self) -> RelayWebhooks<'_> {
        RelayWebhooks::new(self)
    }

    pub fn suppression_list(&self) -> SuppressionList<'_> {
        SuppressionList::new(self)
    }

    pub fn recipient_lists(&self) -> RecipientLists<'_> {
        RecipientLists::new(self)
    }
}

/// Builder for configuring a SparkPost client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    api_host: Option<String>,
    base_path: Option<String>,
    subaccount: Option<String>,
    headers: Vec<(String, String)>,
    debug: bool,
    timeout: Option<Duration>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - API key from `SPARKPOST_API_KEY`
    /// - Host from `SPARKPOST_API_HOST`, else `https://api.sparkpost.com`
    /// - Base path `/api/v1/`
    /// - 30 second request timeout
    /// - No proxy, strict TLS validation
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API host, e.g. `https://api.eu.sparkpost.com`.
    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Send every request on behalf of this subaccount (`X-MSYS-SUBACCOUNT`).
    pub fn subaccount(mut self, subaccount: impl Into<String>) -> Self {
        self.subaccount = Some(subaccount.into());
        self
    }

    /// Add a header that overrides defaults and the subaccount header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Log every request and response at `debug` level through `tracing`.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Total time allowed per request. Expiry surfaces as
    /// [`Error::GatewayTimeoutExceeded`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Resolve settings and build the client.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when no API key is found
    /// or a header override is not a valid HTTP header.
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::Client;
    /// # fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::builder()
    ///     .api_key("my-api-key")
    ///     .subaccount("123")
    ///     .header("X-Custom", "1")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    fn build_with_env(self, env: impl Fn(&str) -> Option<String>) -> Result<Client> {
        let config = self.resolve(env)?;
        let headers = compose_headers(&config)?;

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .timeout(config.timeout);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            config,
            headers,
        })
    }

    fn resolve(&self, env: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let api_key = non_empty(self.api_key.clone())
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .ok_or_else(|| Error::invalid_configuration("You must provide a SparkPost API key"))?;

        let api_host = match &self.api_host {
            Some(host) => non_empty(Some(host.clone())).unwrap_or_default(),
            None => non_empty(env(API_HOST_ENV)).unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
        };
        let api_host = api_host.trim().trim_end_matches('/').to_string();
        if api_host.is_empty() {
            return Err(Error::invalid_configuration(
                "You must provide a SparkPost API host",
            ));
        }

        let base_path = self
            .base_path
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());
        if base_path.is_empty() {
            return Err(Error::invalid_configuration(
                "You must provide a SparkPost base path",
            ));
        }

        Ok(ClientConfig {
            api_key,
            api_host,
            base_path,
            subaccount: self.subaccount.clone(),
            headers: self.headers.clone(),
            debug: self.debug,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_host", &self.api_host)
            .field("base_path", &self.base_path)
            .field("subaccount", &self.subaccount)
            .field("headers", &self.headers)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .finish()
    }
}
