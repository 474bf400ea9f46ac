// SPDX-License-Identifier: MIT

//! Walks a root directory for `.sql` source files and turns each into a
//! [`LocalFile`], using the path↔id mapping to derive its owning namespace.

use bqp_core::{path2id, CoreError, LocalFile};
use std::path::Path;

/// Recursively collect every `.sql` file under `root`, skipping
/// `metadata.json` and anything else. `default_project` substitutes for a
/// `@default` path segment.
pub fn scan(root: &Path, default_project: &str) -> Result<Vec<LocalFile>, CoreError> {
    let mut files = Vec::new();
    walk(root, root, default_project, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, root: &Path, default_project: &str, out: &mut Vec<LocalFile>) -> Result<(), CoreError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&path, root, default_project, out)?;
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }
        let namespace = path2id(&path, root, default_project)?;
        let sql = std::fs::read_to_string(&path)?;
        out.push(LocalFile { path, namespace, sql });
    }
    Ok(())
}

/// Restrict a scan's files to the given project names. An empty `projects`
/// list means "no filter" — everything scanned is kept.
pub fn filter_by_project(files: Vec<LocalFile>, projects: &[String]) -> Vec<LocalFile> {
    if projects.is_empty() {
        return files;
    }
    files.into_iter().filter(|f| projects.iter().any(|p| p == &f.namespace.project)).collect()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
