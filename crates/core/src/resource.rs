// SPDX-License-Identifier: MIT

//! [`ResourceId`] and [`ResourceKind`] — the value types a `project.dataset.name`
//! identifier is built from.

use std::fmt;

/// Kind of warehouse resource a [`ResourceId`] names.
///
/// `Table`, `View`, and `MaterializedView` are distinguished here because the
/// warehouse can report any of the three, but the SQL analyzer and path
/// mapper never need to tell them apart — both collapse to `Table` (see
/// `bqp-analyzer`'s dispatch table and [`crate::path::path2id`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Schema,
    Table,
    View,
    MaterializedView,
    Routine,
    Model,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Schema => "SCHEMA",
            ResourceKind::Table => "TABLE",
            ResourceKind::View => "VIEW",
            ResourceKind::MaterializedView => "MATERIALIZED_VIEW",
            ResourceKind::Routine => "ROUTINE",
            ResourceKind::Model => "MODEL",
        };
        write!(f, "{s}")
    }
}

/// A fully (or partially) qualified warehouse resource identifier.
///
/// `name` is `None` for a dataset-scoped id (`project.dataset`); `Some` for
/// anything inside a dataset (table, routine, model).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResourceId {
    pub project: String,
    pub dataset: String,
    pub name: Option<String>,
    pub kind: ResourceKind,
}

impl ResourceId {
    pub fn schema(project: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            name: None,
            kind: ResourceKind::Schema,
        }
    }

    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        name: impl Into<String>,
        kind: ResourceKind,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            name: Some(name.into()),
            kind,
        }
    }

    /// The dataset-scoped id this resource lives in (drops `name`, forces
    /// `Schema` kind).
    pub fn owning_dataset(&self) -> ResourceId {
        ResourceId::schema(self.project.clone(), self.dataset.clone())
    }

    /// Canonical dotted form. Always three segments unless `schema_only`,
    /// which drops a trailing name (used when a reference resolves to a
    /// bare dataset).
    pub fn normalize(&self, ambient_project: &str, schema_only: bool) -> String {
        let project = if self.project.is_empty() {
            ambient_project
        } else {
            &self.project
        };
        match (&self.name, schema_only) {
            (Some(name), false) => format!("{project}.{}.{name}", self.dataset),
            _ => format!("{project}.{}", self.dataset),
        }
    }
}

/// Resolve analyzer-extracted identifier text (1-3 dotted segments, no
/// quoting) into a [`ResourceId`] of the given kind, relative to the file
/// this identifier was found in.
///
/// - 1 segment: a bare name in `current.dataset` (or the dataset itself, for
///   `Schema`).
/// - 2 segments: `dataset.name` in the ambient project (or `project.dataset`
///   for `Schema`).
/// - 3 segments: fully qualified `project.dataset.name`.
pub fn parse_identifier(
    text: &str,
    kind: ResourceKind,
    ambient_project: &str,
    current_dataset: &ResourceId,
) -> Result<ResourceId, crate::error::CoreError> {
    let parts: Vec<&str> = text.split('.').filter(|s| !s.is_empty()).collect();
    let err = || crate::error::CoreError::InvalidIdentifier(text.to_string());

    if kind == ResourceKind::Schema {
        return match parts.as_slice() {
            [dataset] => Ok(ResourceId::schema(ambient_project, *dataset)),
            [project, dataset] => Ok(ResourceId::schema(*project, *dataset)),
            _ => Err(err()),
        };
    }

    match parts.as_slice() {
        [name] => Ok(ResourceId::new(
            ambient_project,
            current_dataset.dataset.clone(),
            *name,
            kind,
        )),
        [dataset, name] => Ok(ResourceId::new(ambient_project, *dataset, *name, kind)),
        [project, dataset, name] => Ok(ResourceId::new(*project, *dataset, *name, kind)),
        _ => Err(err()),
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}.{}.{name}", self.project, self.dataset),
            None => write!(f, "{}.{}", self.project, self.dataset),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
