use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// `/transmissions`: send messages and manage scheduled sends.
#[derive(Debug, Clone, Copy)]
pub struct Transmissions<'a> {
    client: &'a Client,
}

impl<'a> Transmissions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List scheduled transmissions, optionally filtered by campaign or template.
    pub async fn list(
        &self,
        campaign_id: Option<&str>,
        template_id: Option<&str>,
    ) -> Result<Value> {
        let spec = RequestSpec::get("transmissions")
            .query_opt("campaign_id", campaign_id)
            .query_opt("template_id", template_id);
        self.client.call(spec).await
    }

    /// Create a transmission.
    ///
    /// `num_rcpt_errors` caps how many recipient errors the API reports. When
    /// some recipients are rejected the call fails, but the transmission id is
    /// still available through [`Error::results`](crate::Error::results).
    ///
    /// # Examples
    /// ```no_run
    /// # use simple_spark::Client;
    /// # use serde_json::json;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), simple_spark::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let sent = client
    ///     .transmissions()
    ///     .create(
    ///         &json!({
    ///             "recipients": [{"address": {"email": "rcpt@example.com"}}],
    ///             "content": {
    ///                 "from": "sender@example.com",
    ///                 "subject": "Hello",
    ///                 "text": "Hi there"
    ///             }
    ///         }),
    ///         Some(3),
    ///     )
    ///     .await?;
    /// println!("{}", sent["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        values: &T,
        num_rcpt_errors: Option<u32>,
    ) -> Result<Value> {
        let spec = RequestSpec::post("transmissions")
            .json_body(values)?
            .query_opt("num_rcpt_errors", num_rcpt_errors);
        self.client.call(spec).await
    }

    /// Alias of [`Transmissions::create`].
    pub async fn send_message<T: Serialize + ?Sized>(
        &self,
        values: &T,
        num_rcpt_errors: Option<u32>,
    ) -> Result<Value> {
        self.create(values, num_rcpt_errors).await
    }

    pub async fn retrieve(&self, id: &str) -> Result<Value> {
        let path = format!("transmissions/{}", self.client.url_encode(id));
        self.client.call(RequestSpec::get(path)).await
    }

    /// Delete every scheduled transmission of a campaign.
    pub async fn delete_campaign(&self, campaign_id: &str) -> Result<Value> {
        let spec = RequestSpec::delete("transmissions").query("campaign_id", campaign_id);
        self.client.call(spec).await
    }
}
