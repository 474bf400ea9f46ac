// SPDX-License-Identifier: MIT

//! `bqp bundle` — concatenate every local file's SQL in deployment order
//! without touching a warehouse.

use anyhow::{Context, Result};
use bqp_analyzer::analyze;
use bqp_engine::{render_bundle, PlanInput, Planner};
use clap::Args;
use std::path::PathBuf;

use crate::scan;
use crate::sql_scan;

#[derive(Args)]
pub struct BundleArgs {
    /// Restrict the bundle to these projects; empty means every project under root-path.
    pub projects: Vec<String>,

    /// Root directory the local SQL tree is scanned from.
    #[arg(long = "root-path", default_value = ".")]
    pub root_path: PathBuf,

    /// Ambient project substituted for `@default` path segments.
    #[arg(long, default_value = "bqport-dev")]
    pub project: String,
}

pub async fn run(args: BundleArgs) -> Result<()> {
    let local_files = scan::scan(&args.root_path, &args.project).context("scanning local SQL tree")?;
    let local_files = scan::filter_by_project(local_files, &args.projects);

    let planner = Planner::new(args.project.as_str());
    let mut jobs = Vec::new();
    for file in local_files {
        let tree = sql_scan::parse(&file.sql);
        let analysis = analyze(&tree);
        jobs.push(planner.build_file_job(PlanInput { file, analysis })?);
    }

    let script = render_bundle(jobs)?;
    print!("{script}");
    Ok(())
}
