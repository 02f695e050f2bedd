//! # SimpleSpark
//! Asynchronous client for the SparkPost transactional email API. Every resource group (transmissions, templates, webhooks, suppression list, metrics, ...) is a thin façade over one request pipeline in [`Client`], configured with [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that send or manage transactional email through SparkPost: build a [`Client`] from an API key, pick a resource with an accessor such as [`Client::transmissions`], and work with the JSON the API returns.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, which owns connection reuse, TLS and timeouts. A [`Client`] is `Send + Sync` and can be shared between tasks without extra locking.
//!
//! ## Responses
//! Calls return [`serde_json::Value`]: the `results` field of the response, `{}` for a bodiless success, or the whole body where an endpoint exposes siblings of `results` (see [`RequestSpec::extract_results`]).
//!
//! ## Errors
//! Server-reported failures are classified by status: [`Error::BadRequest`], [`Error::NotFound`], [`Error::ThrottleLimitExceeded`], and [`Error::UnprocessableEntity`] for everything else. Timeouts and `504` become [`Error::GatewayTimeoutExceeded`]; bad configuration is [`Error::InvalidConfiguration`]. Nothing is retried. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Diagnostics go through `tracing`. With [`ClientBuilder::debug`] enabled, each request and response is logged at `debug` level with the API key redacted.
//!
//! ## Example
//! ```no_run
//! use serde_json::json;
//! use simple_spark::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simple_spark::Error> {
//!     let client = Client::new("my-api-key")?;
//!     let result = client
//!         .transmissions()
//!         .create(
//!             &json!({
//!                 "recipients": [{"address": {"email": "rcpt@example.com"}}],
//!                 "content": {"template_id": "welcome"}
//!             }),
//!             None,
//!         )
//!         .await;
//!
//!     match result {
//!         Ok(sent) => println!("Transmission {}", sent["id"]),
//!         Err(err) => {
//!             eprintln!("Send failed: {err}");
//!             if let Some(partial) = err.results() {
//!                 eprintln!("Partial results: {partial}");
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
mod error;
mod models;

pub use client::{
    normalize_response, url_encode, Client, ClientBuilder, ClientConfig, DEFAULT_API_HOST,
    DEFAULT_BASE_PATH,
};
pub use endpoints::{
    Account, Events, InboundDomains, MessageEvents, Metrics, MetricsDate, MetricsQuery,
    RecipientLists, RelayWebhooks, SendingDomains, Subaccounts, SuppressionList, Templates,
    Transmissions, VerifyDomain, Webhooks,
};
pub use error::{ApiError, Error, ErrorItem};
pub use models::{Method, RequestSpec, ResponseEnvelope};

/// Result type alias for SparkPost operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
