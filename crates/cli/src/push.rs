// SPDX-License-Identifier: MIT

//! `bqp push` — scan, analyze, plan, deploy, then reconcile every touched
//! dataset.

use anyhow::{Context, Result};
use bqp_analyzer::analyze;
use bqp_core::{ResourceId, Task};
use bqp_engine::{parse_label, parse_parameter, DeployExecutor, PlanInput, Planner, Reconciler};
use bqp_warehouse::{FakeWarehouseClient, RateLimiter, WarehouseClient};
use bqp_reporter::{OutputFormat, Reporter};
use clap::Args;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::scan;
use crate::sql_scan;

#[derive(Args)]
pub struct PushArgs {
    /// Restrict the run to these projects; empty means every project under root-path.
    pub projects: Vec<String>,

    /// Maximum number of deploy/delete tasks running at once.
    #[arg(long, default_value_t = 8)]
    pub threads: usize,

    /// Root directory the local SQL tree is scanned from.
    #[arg(long = "root-path", default_value = ".")]
    pub root_path: PathBuf,

    /// Output rendering.
    #[arg(long, value_enum, default_value_t)]
    pub format: Format,

    /// Skip the reconciliation confirmation prompt and delete orphaned resources outright.
    #[arg(long)]
    pub force: bool,

    /// Estimate cost and validate without mutating the warehouse.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Label attached to every query job (key:value, repeatable).
    #[arg(long = "label", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,

    /// Query parameter (name:type:value, repeatable; empty name = positional).
    #[arg(long = "parameter", value_parser = parse_parameter)]
    pub parameters: Vec<bqp_warehouse::QueryParameter>,

    #[arg(long)]
    pub maximum_bytes_billed: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Console,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Console => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Run `push`: build the deployment plan from the local tree, execute it
/// with bounded concurrency while the reporter redraws, then reconcile
/// every dataset the plan touched against the warehouse's remote listing.
pub async fn run(args: PushArgs) -> Result<()> {
    let warehouse: Arc<dyn WarehouseClient> = Arc::new(FakeWarehouseClient::new("bqport-dev"));
    let ambient_project = warehouse.project_id().await;
    let rate_limiter = Arc::new(RateLimiter::new(500));

    let local_files = scan::scan(&args.root_path, &ambient_project).context("scanning local SQL tree")?;
    let local_files = scan::filter_by_project(local_files, &args.projects);

    let planner = Planner::new(ambient_project.as_str());
    let mut jobs = Vec::new();
    for file in local_files {
        let tree = sql_scan::parse(&file.sql);
        let analysis = analyze(&tree);
        jobs.push(planner.build_file_job(PlanInput { file, analysis })?);
    }

    // Shared by every deploy and delete so the whole run — not each stage
    // separately — respects one `--threads`-sized pool and one rate budget.
    // A task only ever takes these while it's doing actual warehouse work,
    // never while awaiting a predecessor (see `DeployExecutor::deploy`).
    let semaphore = Arc::new(Semaphore::new(args.threads.max(1)));

    let labels: BTreeMap<String, String> = args.labels.into_iter().collect();
    let executor = Arc::new(
        DeployExecutor::new(warehouse.clone(), ambient_project.as_str())
            .with_labels(labels)
            .with_params(args.parameters)
            .with_maximum_bytes_billed(args.maximum_bytes_billed)
            .with_dry_run(args.dry_run)
            .with_concurrency(semaphore.clone())
            .with_rate_limiter(rate_limiter.clone()),
    );

    let datasets = local_dataset_ids(&jobs);
    let plan = planner.plan(jobs, executor)?;
    for warning in &plan.warnings {
        tracing::warn!("{warning}");
    }

    let mut deploy_tasks: Vec<Arc<Task>> = Vec::new();
    for node in plan.nodes.values() {
        deploy_tasks.extend(node.tasks.iter().cloned());
    }

    let reconciler = Reconciler::new(warehouse.clone())
        .with_concurrency(semaphore.clone())
        .with_rate_limiter(rate_limiter.clone());
    let confirm_is_tty = std::io::stdin().is_terminal();
    let mut reconcile_tasks = Vec::new();
    for (dataset, local_ids) in &datasets {
        let mut tasks = reconciler
            .plan_dataset(dataset, local_ids, args.dry_run, args.force, |kind, names| {
                confirm_deletion(confirm_is_tty, kind, names)
            })
            .await
            .with_context(|| format!("listing remote resources for {dataset}"))?;
        reconcile_tasks.append(&mut tasks);
    }

    let mut entries: Vec<(String, Arc<Task>)> =
        deploy_tasks.iter().map(|t| (t.name().to_string(), t.clone())).collect();
    entries.extend(reconcile_tasks.iter().map(|rt| (rt.task.name().to_string(), rt.task.clone())));

    let reporter = Reporter::new(entries, args.format.into());

    let reporter_handle = tokio::spawn(async move { reporter.run().await });

    // No permit is acquired here: each task's own `run()` awaits its
    // predecessors first (wholly independent of the pool) and only reaches
    // into the shared semaphore/rate-limiter once it actually calls the
    // warehouse, inside `DeployExecutor::deploy`/`Reconciler`'s delete
    // closure. Spawning every task up front lets independent namespaces
    // make progress while others are still blocked on their own parents.
    let mut handles = Vec::new();
    for task in deploy_tasks.iter().cloned() {
        handles.push(tokio::spawn(async move { task.run().await }));
    }
    for rt in &reconcile_tasks {
        let task = rt.task.clone();
        handles.push(tokio::spawn(async move { task.run().await }));
    }
    for handle in handles {
        let _ = handle.await;
    }
    reporter_handle.await.ok();

    let succeeded = deploy_tasks.iter().filter(|t| matches!(t.status(), bqp_core::TaskStatus::Success { .. })).count();
    let failed = deploy_tasks.len() - succeeded;
    let counts = bqp_engine::reconcile::summarize(&reconcile_tasks);
    for (kind, c) in &counts {
        tracing::info!(?kind, succeeded = c.succeeded, failed = c.failed, "reconcile summary");
    }
    println!("deployed: {succeeded} succeeded, {failed} failed");

    Ok(())
}

/// One entry per local dataset: the dataset's own id and the set of
/// resource ids the local tree accounts for within it (used to subtract
/// against the remote listing during reconciliation).
fn local_dataset_ids(jobs: &[bqp_core::FileJob]) -> BTreeMap<ResourceId, BTreeSet<ResourceId>> {
    let mut datasets: BTreeMap<ResourceId, BTreeSet<ResourceId>> = BTreeMap::new();
    for job in jobs {
        let dataset = job.file.namespace.owning_dataset();
        let entry = datasets.entry(dataset).or_default();
        if job.file.namespace.name.is_some() {
            entry.insert(job.file.namespace.clone());
        }
    }
    datasets
}

/// Prompt on a TTY for confirmation before deleting a kind's residual
/// resources; a reply beginning with `y` proceeds. On a non-TTY stream
/// there's no one to ask, so deletion for that kind is skipped.
fn confirm_deletion(is_tty: bool, kind: bqp_core::ResourceKind, names: &[String]) -> bool {
    if !is_tty {
        return false;
    }
    print!("delete {} orphaned {kind}(s): {}? [y/N] ", names.len(), names.join(", "));
    let _ = std::io::stdout().flush();
    let mut reply = String::new();
    if std::io::stdin().read_line(&mut reply).is_err() {
        return false;
    }
    reply.trim().to_ascii_lowercase().starts_with('y')
}
