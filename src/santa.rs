//! Santa resources: configurations and rules.
//!
//! - [`SantaConfiguration`]: `santa/configurations/`. Agent settings
//!   served to enrolled Santa clients. Looked up by name.
//! - [`SantaRule`]: `santa/rules/`. Allow/block rules scoped to a
//!   configuration. Rules have no name, so they are found by listing with
//!   [`SantaRuleListOptions`] (configuration, target type, identifier).

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::options::ListOptions;
use crate::resource::{NamedResource, Resource, Service};
use crate::timestamp::Timestamp;

// ── Configurations ─────────────────────────────────────────────────────

/// Santa client mode: monitor.
pub const SANTA_MODE_MONITOR: i64 = 1;
/// Santa client mode: lockdown.
pub const SANTA_MODE_LOCKDOWN: i64 = 2;

/// A Santa agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SantaConfiguration {
    /// Server-assigned ID.
    pub id: i64,
    /// Configuration name.
    pub name: String,
    /// Client mode, see [`SANTA_MODE_MONITOR`] and [`SANTA_MODE_LOCKDOWN`].
    pub client_mode: i64,
    /// Path regex of binaries that are always allowed.
    #[serde(default)]
    pub allowed_path_regex: String,
    /// Path regex of binaries that are always blocked.
    #[serde(default)]
    pub blocked_path_regex: String,
    /// Seconds between full syncs.
    pub full_sync_interval: i64,
    /// Whether bundle events are collected.
    pub enable_bundles: bool,
    /// Whether transitive rules are enabled.
    pub enable_transitive_rules: bool,
    /// Whether USB mass storage is blocked.
    pub block_usb_mount: bool,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`SantaConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SantaConfigurationRequest {
    /// Configuration name.
    pub name: String,
    /// Client mode.
    pub client_mode: i64,
    /// Path regex of binaries that are always allowed.
    pub allowed_path_regex: String,
    /// Path regex of binaries that are always blocked.
    pub blocked_path_regex: String,
    /// Seconds between full syncs.
    pub full_sync_interval: i64,
    /// Whether bundle events are collected.
    pub enable_bundles: bool,
    /// Whether transitive rules are enabled.
    pub enable_transitive_rules: bool,
    /// Whether USB mass storage is blocked.
    pub block_usb_mount: bool,
}

/// Filters for listing Santa configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SantaConfigurationListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact configuration name.
    pub name: String,
}

impl Resource for SantaConfiguration {
    type Request = SantaConfigurationRequest;
    type ListOptions = SantaConfigurationListOptions;
    const BASE_PATH: &'static str = "santa/configurations/";
    const KIND: &'static str = "santa configuration";
}

impl NamedResource for SantaConfiguration {
    fn name_filter(name: &str) -> SantaConfigurationListOptions {
        SantaConfigurationListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

// ── Rules ──────────────────────────────────────────────────────────────

/// Rule policy: allow execution.
pub const POLICY_ALLOWLIST: i64 = 1;
/// Rule policy: block execution.
pub const POLICY_BLOCKLIST: i64 = 2;
/// Rule policy: block silently.
pub const POLICY_SILENT_BLOCKLIST: i64 = 3;
/// Rule policy: allow compiler and its outputs.
pub const POLICY_ALLOWLIST_COMPILER: i64 = 5;

/// A Santa rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SantaRule {
    /// Server-assigned ID.
    pub id: i64,
    /// Configuration the rule belongs to.
    #[serde(rename = "configuration")]
    pub configuration_id: i64,
    /// Rule policy, see the `POLICY_*` constants.
    pub policy: i64,
    /// Target type: `BINARY`, `BUNDLE`, `CDHASH`, `CERTIFICATE`,
    /// `SIGNINGID` or `TEAMID`.
    pub target_type: String,
    /// Identifier of the target (hash, team ID, signing ID).
    pub target_identifier: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Message displayed to the user when the rule blocks execution.
    #[serde(default)]
    pub custom_msg: String,
    /// Ruleset the rule was synced from, for rules managed by a ruleset.
    #[serde(rename = "ruleset")]
    pub ruleset_id: Option<i64>,
    /// Users the rule applies to.
    #[serde(default)]
    pub primary_users: Vec<String>,
    /// Users the rule never applies to.
    #[serde(default)]
    pub excluded_primary_users: Vec<String>,
    /// Serial numbers the rule applies to.
    #[serde(default)]
    pub serial_numbers: Vec<String>,
    /// Serial numbers the rule never applies to.
    #[serde(default)]
    pub excluded_serial_numbers: Vec<String>,
    /// Tags the rule applies to.
    #[serde(rename = "tags", default)]
    pub tag_ids: Vec<i64>,
    /// Tags the rule never applies to.
    #[serde(rename = "excluded_tags", default)]
    pub excluded_tag_ids: Vec<i64>,
    /// Incremented on every change.
    pub version: i64,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`SantaRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SantaRuleRequest {
    /// Configuration the rule belongs to.
    #[serde(rename = "configuration")]
    pub configuration_id: i64,
    /// Rule policy.
    pub policy: i64,
    /// Target type.
    pub target_type: String,
    /// Target identifier.
    pub target_identifier: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Message displayed when the rule blocks execution.
    #[serde(default)]
    pub custom_msg: String,
    /// Users the rule applies to.
    #[serde(default)]
    pub primary_users: Vec<String>,
    /// Users the rule never applies to.
    #[serde(default)]
    pub excluded_primary_users: Vec<String>,
    /// Serial numbers the rule applies to.
    #[serde(default)]
    pub serial_numbers: Vec<String>,
    /// Serial numbers the rule never applies to.
    #[serde(default)]
    pub excluded_serial_numbers: Vec<String>,
    /// Tags the rule applies to.
    #[serde(rename = "tags", default)]
    pub tag_ids: Vec<i64>,
    /// Tags the rule never applies to.
    #[serde(rename = "excluded_tags", default)]
    pub excluded_tag_ids: Vec<i64>,
}

/// Filters for listing Santa rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SantaRuleListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Only rules of this configuration.
    pub configuration_id: i64,
    /// Only rules with this target type.
    pub target_type: String,
    /// Only rules with this target identifier.
    pub target_identifier: String,
}

impl Resource for SantaRule {
    type Request = SantaRuleRequest;
    type ListOptions = SantaRuleListOptions;
    const BASE_PATH: &'static str = "santa/rules/";
    const KIND: &'static str = "santa rule";
}

impl Client {
    /// Santa agent configurations.
    pub fn santa_configurations(&self) -> Service<'_, SantaConfiguration> {
        Service::new(self)
    }

    /// Santa rules.
    pub fn santa_rules(&self) -> Service<'_, SantaRule> {
        Service::new(self)
    }
}
