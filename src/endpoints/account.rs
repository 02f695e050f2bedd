use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// `/account`: subscription status, quota usage and account-level options.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a Client,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get account information.
    ///
    /// # Arguments
    /// * `include` - Extra sections, comma separated (currently only `usage`)
    pub async fn retrieve(&self, include: Option<&str>) -> Result<Value> {
        let spec = RequestSpec::get("account").query_opt("include", include);
        self.client.call(spec).await
    }

    /// Update the company name or account-level options such as
    /// `smtp_tracking_default` and `transactional_unsub`.
    pub async fn update<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::put("account").json_body(values)?)
            .await
    }
}
