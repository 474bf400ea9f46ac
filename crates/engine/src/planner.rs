// SPDX-License-Identifier: MIT

//! Builds a deployable DAG from a set of analyzed local files: normalizes
//! the analyzer's raw identifier text into [`ResourceId`]s, derives the
//! dependency relation, topologically sorts it, and wires each file's
//! [`Task`] to await its predecessors directly inside its own closure.

use crate::executor::DeployExecutor;
use crate::file_kind::FileKind;
use bqp_analyzer::Analysis;
use bqp_core::{parse_identifier, topo_sort, CoreError, DagNode, FileJob, LocalFile, ResourceId, Task};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// One discovered file paired with what the analyzer found in it.
pub struct PlanInput {
    pub file: LocalFile,
    pub analysis: Analysis,
}

/// The result of planning: a topological ordering of namespaces and, for
/// each namespace that has local files, the [`DagNode`] ready to execute.
/// `order` includes namespaces with no local files (pure dependencies) —
/// useful for `bundle` but not for execution.
pub struct Plan {
    pub order: Vec<ResourceId>,
    pub nodes: IndexMap<ResourceId, Arc<DagNode>>,
    pub warnings: Vec<String>,
}

pub struct Planner {
    ambient_project: String,
}

impl Planner {
    pub fn new(ambient_project: impl Into<String>) -> Self {
        Self {
            ambient_project: ambient_project.into(),
        }
    }

    /// Normalize one file's raw analysis into a [`FileJob`]: destinations are
    /// the identifiers the analyzer tagged as this file's output; deps are
    /// the identifiers it reads from, plus the file's owning dataset (a
    /// table implicitly depends on its dataset existing first). A reference
    /// that resolves to the file's own namespace is dropped — it isn't a
    /// cross-node dependency.
    pub fn build_file_job(&self, input: PlanInput) -> Result<FileJob, CoreError> {
        let namespace = input.file.namespace.clone();

        let mut destinations = BTreeSet::new();
        for (text, kind) in &input.analysis.destinations {
            destinations.insert(parse_identifier(text, *kind, &self.ambient_project, &namespace)?);
        }

        // view.sql's body is a bare SELECT with no CREATE VIEW wrapper — the
        // path convention, not SQL classification, is what makes it a
        // destination (spec.md §3, "view.sql is special-cased to mean
        // replace as view definition"). Without this the file would have no
        // analyzer-recognized destination and never enter the DAG.
        if input.file.path.file_name().and_then(|n| n.to_str()) == Some("view.sql") {
            destinations.insert(namespace.clone());
        }

        let mut deps = BTreeSet::new();
        let owning_dataset = namespace.owning_dataset();
        if owning_dataset != namespace {
            deps.insert(owning_dataset);
        }
        for text in &input.analysis.references {
            if let Ok(id) = parse_identifier(text, bqp_core::ResourceKind::Table, &self.ambient_project, &namespace)
            {
                if id != namespace {
                    deps.insert(id);
                }
            }
        }

        Ok(FileJob {
            file: input.file,
            deps,
            destinations,
        })
    }

    /// Plan a deployment: group jobs by namespace, order each group's files
    /// deterministically, topologically sort namespaces, and build each
    /// namespace's [`DagNode`] with tasks that await their dependencies
    /// directly.
    pub fn plan(&self, jobs: Vec<FileJob>, executor: Arc<DeployExecutor>) -> Result<Plan, CoreError> {
        let groups = group_by_namespace(jobs);
        let (order, node_strs) = order_namespaces(&groups)?;

        let mut warnings = Vec::new();
        let mut built: IndexMap<ResourceId, Arc<DagNode>> = IndexMap::new();

        for ns_id in &order {
            let Some(files) = groups.get(ns_id) else {
                continue;
            };
            if !files.iter().any(|f| f.destinations.contains(ns_id)) {
                warnings.push(format!("{ns_id}: no DDL file but target directory found"));
            }

            let mut tasks: Vec<Arc<Task>> = Vec::new();
            for file in files {
                let mut predecessors: Vec<Arc<Task>> = tasks.clone();
                for dep in &file.deps {
                    if let Some(dep_node) = built.get(dep) {
                        predecessors.extend(dep_node.tasks.iter().cloned());
                    }
                }
                let task_name = format!("{ns_id}/{}", file.filename());
                let exec = executor.clone();
                let job = file.clone();
                let task = Arc::new(Task::new(task_name, async move {
                    let mut failed = Vec::new();
                    for p in &predecessors {
                        if p.wait().await.is_failed() {
                            failed.push(p.name().to_string());
                        }
                    }
                    if !failed.is_empty() {
                        return Err(format!("suspended: parent failed: {}", failed.join(", ")));
                    }
                    exec.deploy(&job).await.map_err(|e| e.to_string())
                }));
                tasks.push(task);
            }
            built.insert(ns_id.clone(), Arc::new(DagNode { id: ns_id.clone(), tasks }));
        }

        for ns_id in groups.keys() {
            if !node_strs.contains(&ns_id.to_string()) {
                warnings.push(format!("{ns_id}: no deployment files"));
            }
        }

        Ok(Plan {
            order,
            nodes: built,
            warnings,
        })
    }
}

pub(crate) fn group_by_namespace(jobs: Vec<FileJob>) -> BTreeMap<ResourceId, Vec<FileJob>> {
    let mut groups: BTreeMap<ResourceId, Vec<FileJob>> = BTreeMap::new();
    for job in jobs {
        groups.entry(job.file.namespace.clone()).or_default().push(job);
    }
    for files in groups.values_mut() {
        files.sort_by(|a, b| {
            let ka = FileKind::classify(a.filename(), &a.file.sql);
            let kb = FileKind::classify(b.filename(), &b.file.sql);
            ka.rank().cmp(&kb.rank()).then_with(|| a.filename().cmp(b.filename()))
        });
    }
    groups
}

/// Topologically order every namespace touched by `groups` — as a
/// destination, as a dependency, or both. Also returns the set of namespace
/// strings that made it into the node set at all (destinations and
/// dependencies only; a namespace with files but no recognized destination
/// and no incoming reference is absent from this set).
pub(crate) fn order_namespaces(
    groups: &BTreeMap<ResourceId, Vec<FileJob>>,
) -> Result<(Vec<ResourceId>, BTreeSet<String>), CoreError> {
    let mut ids_by_str: HashMap<String, ResourceId> = HashMap::new();
    let mut node_strs: BTreeSet<String> = BTreeSet::new();
    let mut edges: BTreeSet<(String, String)> = BTreeSet::new();

    for files in groups.values() {
        for job in files {
            for d in &job.destinations {
                ids_by_str.entry(d.to_string()).or_insert_with(|| d.clone());
                node_strs.insert(d.to_string());
                for s in &job.deps {
                    if job.destinations.contains(s) || s == d {
                        continue;
                    }
                    ids_by_str.entry(s.to_string()).or_insert_with(|| s.clone());
                    edges.insert((d.to_string(), s.to_string()));
                }
            }
        }
    }

    let order_strs = topo_sort(&node_strs, &edges)?;
    let order: Vec<ResourceId> = order_strs
        .iter()
        .map(|s| ids_by_str.get(s).cloned().unwrap_or_else(|| unreachable_id(s)))
        .collect();
    Ok((order, node_strs))
}

fn unreachable_id(s: &str) -> ResourceId {
    unreachable!("topo_sort produced an id not registered during edge building: {s}")
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
