// SPDX-License-Identifier: MIT

//! [`LocalFile`] and [`FileJob`] — a discovered SQL source and the planner's
//! view of its dependencies.

use crate::resource::ResourceId;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A `.sql` file discovered on disk, immutable for the run.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
    pub namespace: ResourceId,
    pub sql: String,
}

/// A file paired with the dependency/destination identifiers the analyzer
/// extracted from it. Built by the planner, consumed by the executor.
#[derive(Debug, Clone)]
pub struct FileJob {
    pub file: LocalFile,
    /// Resource ids this file's queries read from, plus its owning dataset.
    pub deps: BTreeSet<ResourceId>,
    /// Resource ids this file creates or writes.
    pub destinations: BTreeSet<ResourceId>,
}

impl FileJob {
    pub fn filename(&self) -> &str {
        self.file
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }
}
