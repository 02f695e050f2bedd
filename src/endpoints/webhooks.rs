use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ValidateBody<'a, T: ?Sized> {
    message: &'a T,
}

/// `/webhooks`: event batches pushed to an HTTP target.
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    client: &'a Client,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List webhooks. `timezone` controls how timestamps are rendered.
    pub async fn list(&self, timezone: Option<&str>) -> Result<Value> {
        let spec = RequestSpec::get("webhooks").query_opt("timezone", timezone);
        self.client.call(spec).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::post("webhooks").json_body(values)?)
            .await
    }

    pub async fn retrieve(&self, id: &str) -> Result<Value> {
        self.client.call(RequestSpec::get(self.path(id))).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::put(self.path(id)).json_body(values)?)
            .await
    }

    /// Send an example event batch (`message`) to the webhook target.
    pub async fn validate<T: Serialize + ?Sized>(&self, id: &str, message: &T) -> Result<Value> {
        let path = format!("{}/validate", self.path(id));
        self.client
            .call(RequestSpec::post(path).json_body(&ValidateBody { message })?)
            .await
    }

    /// Delivery status of recent batches, at most `limit` of them.
    pub async fn batch_status(&self, id: &str, limit: Option<u32>) -> Result<Value> {
        let path = format!("{}/batch-status", self.path(id));
        self.client
            .call(RequestSpec::get(path).query_opt("limit", limit))
            .await
    }

    /// Sample event payloads, optionally restricted to `events` (comma separated).
    pub async fn samples(&self, events: Option<&str>) -> Result<Value> {
        let spec = RequestSpec::get("webhooks/events/samples").query_opt("events", events);
        self.client.call(spec).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.call(RequestSpec::delete(self.path(id))).await
    }

    fn path(&self, id: &str) -> String {
        format!("webhooks/{}", self.client.url_encode(id))
    }
}
