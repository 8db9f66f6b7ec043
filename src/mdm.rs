//! MDM blueprints (`mdm/blueprints/`).
//!
//! A blueprint groups the inventory collection settings applied to enrolled
//! Apple devices.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::options::ListOptions;
use crate::resource::{NamedResource, Resource, Service};
use crate::timestamp::Timestamp;

/// Inventory item collection is disabled.
pub const COLLECTION_NO: i64 = 0;
/// Only managed items are collected.
pub const COLLECTION_MANAGED_ONLY: i64 = 1;
/// All items are collected.
pub const COLLECTION_ALL: i64 = 2;

/// An MDM blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Server-assigned ID.
    pub id: i64,
    /// Blueprint name.
    pub name: String,
    /// Seconds between inventory refreshes.
    pub inventory_interval: i64,
    /// App collection, see the `COLLECTION_*` constants.
    pub collect_apps: i64,
    /// Certificate collection.
    pub collect_certificates: i64,
    /// Profile collection.
    pub collect_profiles: i64,
    /// Filevault configuration applied by the blueprint, if any.
    #[serde(rename = "filevault_config")]
    pub filevault_config_id: Option<i64>,
    /// Recovery password configuration applied by the blueprint, if any.
    #[serde(rename = "recovery_password_config")]
    pub recovery_password_config_id: Option<i64>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`Blueprint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintRequest {
    /// Blueprint name.
    pub name: String,
    /// Seconds between inventory refreshes.
    pub inventory_interval: i64,
    /// App collection.
    pub collect_apps: i64,
    /// Certificate collection.
    pub collect_certificates: i64,
    /// Profile collection.
    pub collect_profiles: i64,
    /// Filevault configuration. `None` is sent as `null`.
    #[serde(rename = "filevault_config", default)]
    pub filevault_config_id: Option<i64>,
    /// Recovery password configuration. `None` is sent as `null`.
    #[serde(rename = "recovery_password_config", default)]
    pub recovery_password_config_id: Option<i64>,
}

/// Filters for listing blueprints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlueprintListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact blueprint name.
    pub name: String,
}

impl Resource for Blueprint {
    type Request = BlueprintRequest;
    type ListOptions = BlueprintListOptions;
    const BASE_PATH: &'static str = "mdm/blueprints/";
    const KIND: &'static str = "mdm blueprint";
}

impl NamedResource for Blueprint {
    fn name_filter(name: &str) -> BlueprintListOptions {
        BlueprintListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl Client {
    /// MDM blueprints.
    pub fn mdm_blueprints(&self) -> Service<'_, Blueprint> {
        Service::new(self)
    }
}
