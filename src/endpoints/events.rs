use crate::{Client, RequestSpec, Result};
use serde_json::Value;

/// `/events/message`: message event search.
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a Client,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Sample payloads for the given event types (comma separated), or all types.
    pub async fn samples(&self, events: Option<&str>) -> Result<Value> {
        let spec = RequestSpec::get("events/message/samples").query_opt("events", events);
        self.client.call(spec).await
    }

    /// Filtered search, newest first. `params` go to the query string as-is.
    pub async fn search<I, K, V>(&self, params: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let spec = RequestSpec::get("events/message").query_pairs(params);
        self.client.call(spec).await
    }
}
