use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

/// Body of a sending-domain verification request.
///
/// - `dkim_verify` / `spf_verify` check the corresponding DNS record.
/// - `postmaster_at_verify` / `abuse_at_verify` mail a verification link to
///   `postmaster@` / `abuse@` on the domain.
/// - `postmaster_at_token` / `abuse_at_token` check a token from such a link.
///
/// Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spf_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postmaster_at_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse_at_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postmaster_at_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse_at_token: Option<String>,
}

impl VerifyDomain {
    /// Check both the DKIM and SPF records.
    pub fn dns() -> Self {
        Self {
            dkim_verify: Some(true),
            spf_verify: Some(true),
            ..Self::default()
        }
    }
}

/// `/sending-domains`.
#[derive(Debug, Clone, Copy)]
pub struct SendingDomains<'a> {
    client: &'a Client,
}

impl<'a> SendingDomains<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("sending-domains")).await
    }

    /// Create a sending domain, e.g. `{"domain": ..., "tracking_domain": ...}`.
    pub async fn create<T: Serialize + ?Sized>(&self, values: &T) -> Result<Value> {
        self.client
            .call(RequestSpec::post("sending-domains").json_body(values)?)
            .await
    }

    pub async fn retrieve(&self, domain_name: &str) -> Result<Value> {
        self.client.call(RequestSpec::get(self.path(domain_name))).await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        domain_name: &str,
        values: &T,
    ) -> Result<Value> {
        self.client
            .call(RequestSpec::put(self.path(domain_name)).json_body(values)?)
            .await
    }

    /// Start or complete verification of a sending domain.
    pub async fn verify(&self, domain_name: &str, request: &VerifyDomain) -> Result<Value> {
        let path = format!("{}/verify", self.path(domain_name));
        self.client
            .call(RequestSpec::post(path).json_body(request)?)
            .await
    }

    pub async fn delete(&self, domain_name: &str) -> Result<Value> {
        self.client
            .call(RequestSpec::delete(self.path(domain_name)))
            .await
    }

    fn path(&self, domain_name: &str) -> String {
        format!("sending-domains/{}", self.client.url_encode(domain_name))
    }
}
