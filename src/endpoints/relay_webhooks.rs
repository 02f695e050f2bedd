use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// `/relay-webhooks`: forward inbound mail for a domain to an HTTP target.
#[derive(Debug, Clone, Copy)]
pub struct RelayWebhooks<'a> {
    client: &'a Client,
}

impl<'a> RelayWebhooks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("relay-webhooks")).await
    }

    /// Create a relay webhook.
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::Client;
    /// # use serde_json::json;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let created = client
    ///     .relay_webhooks()
    ///     .create(&json!({
    ///         "name": "Replies Webhook",
    ///         "target": "https://webhooks.customer.example/replies",
    ///         "match": {"protocol": "SMTP", "domain": "email.example.com"}
    ///     }))
    ///     .await?;
    /// println!("{}", created["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::post("relay-webhooks").json_body(values)?)
            .await
    }

    pub async fn retrieve(&self, webhook_id: &str) -> Result<Value> {
        self.client.call(RequestSpec::get(self.path(webhook_id))).await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        webhook_id: &str,
        values: &T,
    ) -> Result<Value> {
        self.client
            .call(RequestSpec::put(self.path(webhook_id)).json_body(values)?)
            .await
    }

    pub async fn delete(&self, webhook_id: &str) -> Result<Value> {
        self.client
            .call(RequestSpec::delete(self.path(webhook_id)))
            .await
    }

    fn path(&self, webhook_id: &str) -> String {
        format!("relay-webhooks/{}", self.client.url_encode(webhook_id))
    }
}
