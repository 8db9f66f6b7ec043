//! Inventory resources: tags, taxonomies and meta business units.
//!
//! - [`Tag`]: `inventory/tags/`. A label attached to machines, optionally
//!   grouped in a [`Taxonomy`].
//! - [`Taxonomy`]: `inventory/taxonomies/`. A namespace for tags.
//! - [`MetaBusinessUnit`]: `inventory/meta_business_units/`. The top-level
//!   grouping of machines across inventory sources.
//!
//! All three support lookup by name via
//! [`Service::get_by_name`](crate::resource::Service::get_by_name).

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::options::ListOptions;
use crate::resource::{NamedResource, Resource, Service};
use crate::timestamp::Timestamp;

// ── Tags ───────────────────────────────────────────────────────────────

/// An inventory tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned ID.
    pub id: i64,
    /// Taxonomy the tag belongs to, if any.
    #[serde(rename = "taxonomy")]
    pub taxonomy_id: Option<i64>,
    /// Tag name, unique within its taxonomy.
    pub name: String,
    /// Six-digit hex color, without the leading `#`.
    pub color: String,
}

/// Body for creating or updating a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRequest {
    /// Taxonomy to file the tag under. `None` is sent as `null`.
    #[serde(rename = "taxonomy")]
    pub taxonomy_id: Option<i64>,
    /// Tag name.
    pub name: String,
    /// Six-digit hex color, without the leading `#`.
    pub color: String,
}

/// Filters for listing tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact tag name.
    pub name: String,
}

impl Resource for Tag {
    type Request = TagRequest;
    type ListOptions = TagListOptions;
    const BASE_PATH: &'static str = "inventory/tags/";
    const KIND: &'static str = "tag";
}

impl NamedResource for Tag {
    fn name_filter(name: &str) -> TagListOptions {
        TagListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

// ── Taxonomies ─────────────────────────────────────────────────────────

/// A tag taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Server-assigned ID.
    pub id: i64,
    /// Meta business unit the taxonomy is restricted to, if any.
    #[serde(rename = "meta_business_unit")]
    pub meta_business_unit_id: Option<i64>,
    /// Taxonomy name.
    pub name: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`Taxonomy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRequest {
    /// Meta business unit restriction. `None` is sent as `null`.
    #[serde(rename = "meta_business_unit")]
    pub meta_business_unit_id: Option<i64>,
    /// Taxonomy name.
    pub name: String,
}

/// Filters for listing taxonomies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxonomyListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact taxonomy name.
    pub name: String,
}

impl Resource for Taxonomy {
    type Request = TaxonomyRequest;
    type ListOptions = TaxonomyListOptions;
    const BASE_PATH: &'static str = "inventory/taxonomies/";
    const KIND: &'static str = "taxonomy";
}

impl NamedResource for Taxonomy {
    fn name_filter(name: &str) -> TaxonomyListOptions {
        TaxonomyListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

// ── Meta business units ────────────────────────────────────────────────

/// A meta business unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBusinessUnit {
    /// Server-assigned ID.
    pub id: i64,
    /// Unit name.
    pub name: String,
    /// Whether machines can be enrolled into this unit through the API.
    pub api_enrollment_enabled: bool,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Body for creating or updating a [`MetaBusinessUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBusinessUnitRequest {
    /// Unit name.
    pub name: String,
    /// Whether API enrollment is enabled.
    pub api_enrollment_enabled: bool,
}

/// Filters for listing meta business units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaBusinessUnitListOptions {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: ListOptions,
    /// Exact unit name.
    pub name: String,
}

impl Resource for MetaBusinessUnit {
    type Request = MetaBusinessUnitRequest;
    type ListOptions = MetaBusinessUnitListOptions;
    const BASE_PATH: &'static str = "inventory/meta_business_units/";
    const KIND: &'static str = "meta business unit";
}

impl NamedResource for MetaBusinessUnit {
    fn name_filter(name: &str) -> MetaBusinessUnitListOptions {
        MetaBusinessUnitListOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl Client {
    /// Inventory tags.
    pub fn tags(&self) -> Service<'_, Tag> {
        Service::new(self)
    }

    /// Tag taxonomies.
    pub fn taxonomies(&self) -> Service<'_, Taxonomy> {
        Service::new(self)
    }

    /// Meta business units.
    pub fn meta_business_units(&self) -> Service<'_, MetaBusinessUnit> {
        Service::new(self)
    }
}
