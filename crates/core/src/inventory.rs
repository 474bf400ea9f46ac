// SPDX-License-Identifier: MIT

//! [`RemoteInventory`] — a per-dataset snapshot of remote resources, used by
//! the reconciliation planner.

use crate::resource::ResourceId;
use std::collections::BTreeMap;

/// Three disjoint maps of what the warehouse reports living in a dataset,
/// keyed by fully-qualified id. Snapshotted once per reconcile pass; never
/// mutated in place — residuals are read off after local paths are
/// subtracted out by the caller.
#[derive(Debug, Clone, Default)]
pub struct RemoteInventory {
    pub tables: BTreeMap<String, ResourceId>,
    pub routines: BTreeMap<String, ResourceId>,
    pub models: BTreeMap<String, ResourceId>,
}

impl RemoteInventory {
    pub fn total_len(&self) -> usize {
        self.tables.len() + self.routines.len() + self.models.len()
    }
}
