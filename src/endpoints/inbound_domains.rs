use crate::{Client, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct CreateInboundDomain<'a> {
    domain: &'a str,
}

/// `/inbound-domains`: domains SparkPost accepts inbound mail for.
#[derive(Debug, Clone, Copy)]
pub struct InboundDomains<'a> {
    client: &'a Client,
}

impl<'a> InboundDomains<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        self.client.call(RequestSpec::get("inbound-domains")).await
    }

    pub async fn create(&self, domain_name: &str) -> Result<Value> {
        let body = CreateInboundDomain {
            domain: domain_name,
        };
        self.client
            .call(RequestSpec::post("inbound-domains").json_body(&body)?)
            .await
    }

    pub async fn retrieve(&self, domain_name: &str) -> Result<Value> {
        self.client.call(RequestSpec::get(self.path(domain_name))).await
    }

    pub async fn delete(&self, domain_name: &str) -> Result<Value> {
        self.client
            .call(RequestSpec::delete(self.path(domain_name)))
            .await
    }

    fn path(&self, domain_name: &str) -> String {
        format!("inbound-domains/{}", self.client.url_encode(domain_name))
    }
}
