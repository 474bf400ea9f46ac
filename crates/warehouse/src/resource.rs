// SPDX-License-Identifier: MIT

//! A fetched warehouse resource handle, plus its metadata-mirror payload
//! alongside a fetched resource handle.

use bqp_core::ResourceId;
use std::collections::BTreeMap;

/// A GET'd resource, tagged by what kind of GET produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Dataset(ResourceId),
    Table(ResourceId),
    Routine(ResourceId),
    Model(ResourceId),
}

impl Resource {
    pub fn id(&self) -> &ResourceId {
        match self {
            Resource::Dataset(id)
            | Resource::Table(id)
            | Resource::Routine(id)
            | Resource::Model(id) => id,
        }
    }
}

/// The side-car metadata mirrored between `metadata.json` and the remote
/// resource's labels/description/column descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_descriptions: BTreeMap<String, String>,
}
