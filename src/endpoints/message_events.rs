use crate::{Client, RequestSpec, Result};
use serde_json::Value;

/// `/message-events`, the older message event search.
#[derive(Debug, Clone, Copy)]
pub struct MessageEvents<'a> {
    client: &'a Client,
}

impl<'a> MessageEvents<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn samples(&self, events: Option<&str>) -> Result<Value> {
        let spec = RequestSpec::get("message-events/events/samples").query_opt("events", events);
        self.client.call(spec).await
    }

    pub async fn search<I, K, V>(&self, params: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.client
            .call(RequestSpec::get("message-events").query_pairs(params))
            .await
    }
}
