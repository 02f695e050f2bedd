use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// `/recipient-lists`.
#[derive(Debug, Clone, Copy)]
pub struct RecipientLists<'a> {
    client: &'a Client,
}

impl<'a> RecipientLists<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Abbreviated list of all recipient lists.
    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("recipient-lists")).await
    }

    /// Create a list from `id`, `name`, `description`, `attributes` and `recipients`.
    ///
    /// `num_rcpt_errors` caps how many recipient errors the API reports.
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        values: &T,
        num_rcpt_errors: Option<u32>,
    ) -> Result<Value> {
        let spec = RequestSpec::post("recipient-lists")
            .json_body(values)?
            .query_opt("num_rcpt_errors", num_rcpt_errors);
        self.client.call(spec).await
    }

    pub async fn retrieve(&self, id: &str, show_recipients: bool) -> Result<Value> {
        let spec = RequestSpec::get(self.path(id)).query("show_recipients", show_recipients);
        self.client.call(spec).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::put(self.path(id)).json_body(values)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.call(RequestSpec::delete(self.path(id))).await
    }

    fn path(&self, id: &str) -> String {
        format!("recipient-lists/{}", self.client.url_encode(id))
    }
}
