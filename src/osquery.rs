//! Osquery packs (`osquery/packs/`).

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::options::ListOptions;
use crate::resource::{NamedResource, Resource, Service};
use crate::timestamp::Timestamp;

/// An osquery query pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// Server-assigned ID.
    pub id: i64,
    /// Pack name.
    pub name: String,
    /// URL-safe name derived from `name` by the server.
    pub slug: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Queries deciding whether the pack runs on a host.
    #[serde(default)]
    pub discovery_queries: Vec<String>,
    /// Percentage of hosts the pack runs on, when sharded.
    pub shard: Option<i64>,
    /// Routing key attached to the events produced by the pack.
    #[serde(default)]
    pub event_routing_key: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`Pack`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRequest {
    /// Pack name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Discovery queries.
    #[serde(default)]
    pub discovery_queries: Vec<String>,
    /// Shard percentage. `None` is sent as `null`.
    #[serde(default)]
    pub shard: Option<i64>,
    /// Event routing key.
    #[serde(default)]
    pub event_routing_key: String,
}

/// Filters for listing packs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact pack name.
    pub name: String,
}

impl Resource for Pack {
    type Request = PackRequest;
    type ListOptions = PackListOptions;
    const BASE_PATH: &'static str = "osquery/packs/";
    const KIND: &'static str = "osquery pack";
}

impl NamedResource for Pack {
    fn name_filter(name: &str) -> PackListOptions {
        PackListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl Client {
    /// Osquery packs.
    pub fn osquery_packs(&self) -> Service<'_, Pack> {
        Service::new(self)
    }
}
