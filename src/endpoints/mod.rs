//! Resource façades, one per SparkPost API resource group.
//!
//! Each façade borrows the [`Client`](crate::Client) it was obtained from and
//! turns its arguments into a [`RequestSpec`](crate::RequestSpec) for
//! [`Client::call`](crate::Client::call). Identifiers embedded in paths are
//! escaped with [`url_encode`](crate::url_encode).

mod account;
mod events;
mod inbound_domains;
mod message_events;
mod metrics;
mod recipient_lists;
mod relay_webhooks;
mod sending_domains;
mod subaccounts;
mod suppression_list;
mod templates;
mod transmissions;
mod webhooks;

pub use account::Account;
pub use events::Events;
pub use inbound_domains::InboundDomains;
pub use message_events::MessageEvents;
pub use metrics::{Metrics, MetricsDate, MetricsQuery};
pub use recipient_lists::RecipientLists;
pub use relay_webhooks::RelayWebhooks;
pub use sending_domains::{SendingDomains, VerifyDomain};
pub use subaccounts::Subaccounts;
pub use suppression_list::SuppressionList;
pub use templates::Templates;
pub use transmissions::Transmissions;
pub use webhooks::Webhooks;
