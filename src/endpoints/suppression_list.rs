use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct BulkUpsert<'a, T> {
    recipients: &'a [T],
}

/// `/suppression-list`: recipients that must not be mailed.
#[derive(Debug, Clone, Copy)]
pub struct SuppressionList<'a> {
    client: &'a Client,
}

impl<'a> SuppressionList<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Search entries. `params` go to the query string as-is.
    pub async fn search<I, K, V>(&self, params: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.client
            .call(RequestSpec::get("suppression-list").query_pairs(params))
            .await
    }

    /// Insert or update entries in bulk, e.g.
    /// `{"recipient": "rcpt@example.com", "type": "transactional", "description": ...}`.
    pub async fn create_or_update<T: Serialize>(&self, recipients: &[T]) -> Result<Value> {
        self.client
            .call(RequestSpec::put("suppression-list").json_body(&BulkUpsert { recipients })?)
            .await
    }

    pub async fn retrieve(&self, recipient_email: &str) -> Result<Value> {
        self.client
            .call(RequestSpec::get(self.path(recipient_email)))
            .await
    }

    pub async fn delete(&self, recipient_email: &str) -> Result<Value> {
        self.client
            .call(RequestSpec::delete(self.path(recipient_email)))
            .await
    }

    fn path(&self, recipient_email: &str) -> String {
        format!("suppression-list/{}", self.client.url_encode(recipient_email))
    }
}
