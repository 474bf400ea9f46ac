// SPDX-License-Identifier: MIT

//! Path ↔ [`ResourceId`] mapping.
//!
//! ```text
//! <root>/<project-or-@default>/<dataset>/[<resource>]/<filename>
//! ```
//!
//! `@default` substitutes the client's ambient project; `@routines` and
//! `@models` segments qualify the resource kind; a bare resource directory
//! (no namespace segment) implies table/view.

use crate::error::CoreError;
use crate::resource::{ResourceId, ResourceKind};
use std::path::{Path, PathBuf};

const DEFAULT_SEGMENT: &str = "@default";
const ROUTINES_SEGMENT: &str = "@routines";
const MODELS_SEGMENT: &str = "@models";

/// Filename that targets the dataset itself when it sits directly under the
/// dataset directory (no resource subdirectory).
pub const DATASET_DDL_FILENAME: &str = "ddl.sql";

/// Map an on-disk path to the [`ResourceId`] it names.
///
/// `path` may point either at a file (`ddl.sql`, `view.sql`, `metadata.json`,
/// ...) or directly at a resource directory — both resolve to the same id,
/// which is what lets [`id2path`] round-trip.
pub fn path2id(
    path: &Path,
    root: &Path,
    default_project: &str,
) -> Result<ResourceId, CoreError> {
    let relative = path.strip_prefix(root).map_err(|_| CoreError::InvalidPath {
        path: path.display().to_string(),
    })?;

    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        return Err(CoreError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    // Drop a trailing filename component (anything with a recognized
    // extension); a bare directory path has none to drop.
    if let Some(last) = segments.last() {
        if last.ends_with(".sql") || last.ends_with(".json") {
            segments.pop();
        }
    }

    if segments.is_empty() {
        return Err(CoreError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let project_raw = segments.remove(0);
    let project = if project_raw == DEFAULT_SEGMENT {
        default_project.to_string()
    } else {
        project_raw
    };

    if segments.is_empty() {
        return Err(CoreError::InvalidPath {
            path: path.display().to_string(),
        });
    }
    let dataset = segments.remove(0);

    match segments.as_slice() {
        [] => Ok(ResourceId::schema(project, dataset)),
        [name] => Ok(ResourceId::new(project, dataset, name.clone(), ResourceKind::Table)),
        [ns, name] if ns == ROUTINES_SEGMENT => {
            Ok(ResourceId::new(project, dataset, name.clone(), ResourceKind::Routine))
        }
        [ns, name] if ns == MODELS_SEGMENT => {
            Ok(ResourceId::new(project, dataset, name.clone(), ResourceKind::Model))
        }
        _ => Err(CoreError::InvalidPath {
            path: path.display().to_string(),
        }),
    }
}

/// Reconstruct the resource directory for an id, rooted at `root`.
///
/// Always writes the literal project name (never `@default`) so that
/// `path2id(id2path(id, root), root, anything) == id`.
pub fn id2path(id: &ResourceId, root: &Path) -> PathBuf {
    let mut path = root.join(&id.project).join(&id.dataset);
    match (&id.kind, &id.name) {
        (ResourceKind::Routine, Some(name)) => path = path.join(ROUTINES_SEGMENT).join(name),
        (ResourceKind::Model, Some(name)) => path = path.join(MODELS_SEGMENT).join(name),
        (_, Some(name)) => path = path.join(name),
        (_, None) => {}
    }
    path
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
