//! `/metrics`: deliverability reporting.
//!
//! Query dates are sent as `YYYY-MM-DDThh:mm`; anything implementing
//! [`MetricsDate`] can be passed to [`MetricsQuery::from`] and [`MetricsQuery::to`].

use crate::{Client, RequestSpec, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;
use std::fmt;

const METRICS_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A date-like value the metrics API accepts in `from`/`to`.
pub trait MetricsDate {
    fn to_metrics_date(&self) -> String;
}

impl MetricsDate for NaiveDateTime {
    fn to_metrics_date(&self) -> String {
        self.format(METRICS_DATE_FORMAT).to_string()
    }
}

/// Midnight of the given day.
impl MetricsDate for NaiveDate {
    fn to_metrics_date(&self) -> String {
        format!("{}T00:00", self.format("%Y-%m-%d"))
    }
}

/// Rendered in the value's own offset.
impl<Tz: TimeZone> MetricsDate for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn to_metrics_date(&self) -> String {
        self.format(METRICS_DATE_FORMAT).to_string()
    }
}

/// Already formatted; sent verbatim.
impl MetricsDate for str {
    fn to_metrics_date(&self) -> String {
        self.to_string()
    }
}

impl MetricsDate for String {
    fn to_metrics_date(&self) -> String {
        self.clone()
    }
}

impl<T: MetricsDate + ?Sized> MetricsDate for &T {
    fn to_metrics_date(&self) -> String {
        (**self).to_metrics_date()
    }
}

/// Query for the deliverability endpoints.
///
/// List-valued filters are sent comma separated.
///
/// ```
/// use chrono::NaiveDate;
/// use simple_spark::MetricsQuery;
///
/// let query = MetricsQuery::new()
///     .from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .to("2024-03-31T23:59")
///     .metrics(["count_injected", "count_bounce"])
///     .domains(["gmail.com"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsQuery {
    from: Option<String>,
    to: Option<String>,
    metrics: Vec<String>,
    domains: Vec<String>,
    campaigns: Vec<String>,
    templates: Vec<String>,
    sending_domains: Vec<String>,
    subaccounts: Vec<String>,
    timezone: Option<String>,
    precision: Option<String>,
    limit: Option<u32>,
    order_by: Option<String>,
    extra: Vec<(String, String)>,
}

impl MetricsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, date: impl MetricsDate) -> Self {
        self.from = Some(date.to_metrics_date());
        self
    }

    pub fn to(mut self, date: impl MetricsDate) -> Self {
        self.to = Some(date.to_metrics_date());
        self
    }

    /// Metric names to compute, e.g. `count_injected`, `count_delivered`.
    pub fn metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics.extend(metrics.into_iter().map(Into::into));
        self
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn campaigns<I, S>(mut self, campaigns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.campaigns.extend(campaigns.into_iter().map(Into::into));
        self
    }

    pub fn templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates.extend(templates.into_iter().map(Into::into));
        self
    }

    pub fn sending_domains<I, S>(mut self, sending_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sending_domains
            .extend(sending_domains.into_iter().map(Into::into));
        self
    }

    pub fn subaccounts<I, S>(mut self, subaccounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.subaccounts
            .extend(subaccounts.into_iter().map(|s| s.to_string()));
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Time-series bucket size: `1min`, `5min`, `15min`, `hour`, `12hr`, `day`, `week`, `month`.
    pub fn precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Any other query parameter the API accepts.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    fn into_pairs(self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };
        let joined = |values: Vec<String>| (!values.is_empty()).then(|| values.join(","));

        push("from", self.from);
        push("to", self.to);
        push("metrics", joined(self.metrics));
        push("domains", joined(self.domains));
        push("campaigns", joined(self.campaigns));
        push("templates", joined(self.templates));
        push("sending_domains", joined(self.sending_domains));
        push("subaccounts", joined(self.subaccounts));
        push("timezone", self.timezone);
        push("precision", self.precision);
        push("limit", self.limit.map(|l| l.to_string()));
        push("order_by", self.order_by);
        pairs.extend(self.extra);
        pairs
    }
}

/// `/metrics` façade.
#[derive(Debug, Clone, Copy)]
pub struct Metrics<'a> {
    client: &'a Client,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The API root: the full body, including its `links` to child endpoints.
    pub async fn discoverability_links(&self) -> Result<Value> {
        self.client
            .call(RequestSpec::get("metrics").extract_results(false))
            .await
    }

    /// Aggregate deliverability metrics over the whole query window.
    pub async fn deliverability_metrics_summary(&self, query: MetricsQuery) -> Result<Value> {
        self.deliverability("metrics/deliverability", query).await
    }

    pub async fn deliverability_metrics_by_domain(&self, query: MetricsQuery) -> Result<Value> {
        self.deliverability("metrics/deliverability/domain", query)
            .await
    }

    pub async fn deliverability_metrics_by_sending_domain(
        &self,
        query: MetricsQuery,
    ) -> Result<Value> {
        self.deliverability("metrics/deliverability/sending-domain", query)
            .await
    }

    pub async fn deliverability_metrics_by_campaign(&self, query: MetricsQuery) -> Result<Value> {
        self.deliverability("metrics/deliverability/campaign", query)
            .await
    }

    pub async fn deliverability_metrics_by_template(&self, query: MetricsQuery) -> Result<Value> {
        self.deliverability("metrics/deliverability/template", query)
            .await
    }

    pub async fn deliverability_metrics_by_watched_domain(
        &self,
        query: MetricsQuery,
    ) -> Result<Value> {
        self.deliverability("metrics/deliverability/watched-domain", query)
            .await
    }

    /// Metrics bucketed by the query's `precision`.
    pub async fn deliverability_time_series(&self, query: MetricsQuery) -> Result<Value> {
        self.deliverability("metrics/deliverability/time-series", query)
            .await
    }

    async fn deliverability(&self, path: &str, query: MetricsQuery) -> Result<Value> {
        self.client
            .call(RequestSpec::get(path).query_pairs(query.into_pairs()))
            .await
    }
}
