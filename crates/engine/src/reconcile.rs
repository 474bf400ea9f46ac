// SPDX-License-Identifier: MIT

//! Finds remote resources with no corresponding local file and plans their
//! deletion. Each residual resource gets its own [`Task`] named
//! `<project>/<dataset>/(DELETE)/<KIND>/<name>`; deleting one residual never
//! blocks on another, so these tasks have no dependency edges between them
//! and can all run concurrently.

use bqp_core::{RemoteInventory, ResourceId, ResourceKind, Task};
use bqp_warehouse::{RateLimiter, WarehouseClient};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A planned deletion, tagged with the kind it deletes so callers can
/// tally outcomes per kind without re-parsing the task name.
pub struct ReconcileTask {
    pub kind: ResourceKind,
    pub task: Arc<Task>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileCounts {
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Reconciler {
    warehouse: Arc<dyn WarehouseClient>,
    concurrency: Option<Arc<Semaphore>>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl Reconciler {
    pub fn new(warehouse: Arc<dyn WarehouseClient>) -> Self {
        Self {
            warehouse,
            concurrency: None,
            rate_limiter: None,
        }
    }

    /// Share a `--threads`-sized pool with [`crate::DeployExecutor`] so
    /// deletes and deploys draw from the same bounded worker pool instead of
    /// each stage getting its own.
    pub fn with_concurrency(mut self, semaphore: Arc<Semaphore>) -> Self {
        self.concurrency = Some(semaphore);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Snapshot `dataset`'s remote tables/routines/models, subtract
    /// everything `local_ids` accounts for, and return one delete task per
    /// residual. When `dry_run` is set the task records the intent without
    /// calling through to the warehouse. When neither `force` nor `dry_run`
    /// is set, `confirm` is consulted once per kind with residual entries
    /// before any deletion for that kind is planned; declining skips that
    /// kind entirely.
    pub async fn plan_dataset(
        &self,
        dataset: &ResourceId,
        local_ids: &BTreeSet<ResourceId>,
        dry_run: bool,
        force: bool,
        mut confirm: impl FnMut(ResourceKind, &[String]) -> bool,
    ) -> Result<Vec<ReconcileTask>, bqp_warehouse::WarehouseError> {
        let mut inventory = RemoteInventory::default();
        for id in self.warehouse.list_tables(dataset).await? {
            inventory.tables.insert(id.to_string(), id);
        }
        for id in self.warehouse.list_routines(dataset).await? {
            inventory.routines.insert(id.to_string(), id);
        }
        for id in self.warehouse.list_models(dataset).await? {
            inventory.models.insert(id.to_string(), id);
        }

        for id in local_ids {
            let key = id.to_string();
            match id.kind {
                ResourceKind::Routine => {
                    inventory.routines.remove(&key);
                }
                ResourceKind::Model => {
                    inventory.models.remove(&key);
                }
                _ => {
                    inventory.tables.remove(&key);
                }
            }
        }

        let mut tasks = Vec::new();
        for (kind, residual) in [
            (ResourceKind::Table, inventory.tables),
            (ResourceKind::Routine, inventory.routines),
            (ResourceKind::Model, inventory.models),
        ] {
            if residual.is_empty() {
                continue;
            }
            if !force && !dry_run {
                let names: Vec<String> = residual.values().filter_map(|id| id.name.clone()).collect();
                if !confirm(kind, &names) {
                    continue;
                }
            }
            for id in residual.into_values() {
                tasks.push(self.delete_task(dataset, kind, id, dry_run));
            }
        }
        Ok(tasks)
    }

    fn delete_task(&self, dataset: &ResourceId, kind: ResourceKind, id: ResourceId, dry_run: bool) -> ReconcileTask {
        let name = format!(
            "{}/{}/(DELETE)/{kind}/{}",
            dataset.project,
            dataset.dataset,
            id.name.clone().unwrap_or_default()
        );
        let warehouse = self.warehouse.clone();
        let concurrency = self.concurrency.clone();
        let rate_limiter = self.rate_limiter.clone();
        let task = Arc::new(Task::new(name, async move {
            if dry_run {
                return Ok(Some("would delete".to_string()));
            }
            // The scheduling permit and rate-limit token are only taken
            // around the RPC itself, never while a task waits on anything
            // else — these deletes have no predecessors, but the pool is
            // shared with the deploy side, which does.
            let _permit = match &concurrency {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            if let Some(limiter) = &rate_limiter {
                limiter.acquire().await;
            }
            warehouse.delete_resource(&id).await.map(|_| None).map_err(|e| e.to_string())
        }));
        ReconcileTask { kind, task }
    }
}

/// Tally succeeded/failed outcomes per kind after every task has finished.
/// Individual delete failures are swallowed here, not propagated — one
/// residual failing to delete never stops the others.
pub fn summarize(tasks: &[ReconcileTask]) -> BTreeMap<ResourceKind, ReconcileCounts> {
    let mut counts: BTreeMap<ResourceKind, ReconcileCounts> = BTreeMap::new();
    for rt in tasks {
        let entry = counts.entry(rt.kind).or_default();
        if rt.task.status().is_failed() {
            entry.failed += 1;
        } else {
            entry.succeeded += 1;
        }
    }
    counts
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
