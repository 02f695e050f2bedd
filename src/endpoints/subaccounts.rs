use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// `/subaccounts`.
#[derive(Debug, Clone, Copy)]
pub struct Subaccounts<'a> {
    client: &'a Client,
}

impl<'a> Subaccounts<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("subaccounts")).await
    }

    /// Create a subaccount, e.g. `{"name": ..., "key_label": ..., "key_grants": [...]}`.
    pub async fn create<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::post("subaccounts").json_body(values)?)
            .await
    }

    pub async fn retrieve(&self, id: impl ToString) -> Result<Value> {
        let path = format!("subaccounts/{}", self.client.url_encode(&id.to_string()));
        self.client.call(RequestSpec::get(path)).await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: impl ToString,
        values: &T,
    ) -> Result<Value> {
        let path = format!("subaccounts/{}", self.client.url_encode(&id.to_string()));
        self.client
            .call(RequestSpec::put(path).json_body(values)?)
            .await
    }
}
