// SPDX-License-Identifier: MIT

//! Deploys a single file: submits its SQL as a query job (or, for
//! `view.sql`, issues a dedicated `CREATE OR REPLACE VIEW`), resolves the
//! resource the job produced, and mirrors metadata back to disk when that
//! resource is the file's own directory.

use bqp_core::FileJob;
use bqp_warehouse::{
    JobMetadata, JobPriority, ParamValue, QueryJobConfig, QueryParameter, RateLimiter, Resource,
    StatementType, WarehouseClient, WarehouseError,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::Instrument;

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
    #[error("not supported: {0}")]
    Unsupported(String),
}

pub struct DeployExecutor {
    warehouse: Arc<dyn WarehouseClient>,
    ambient_project: String,
    labels: BTreeMap<String, String>,
    params: Vec<QueryParameter>,
    maximum_bytes_billed: Option<u64>,
    dry_run: bool,
    concurrency: Option<Arc<Semaphore>>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl DeployExecutor {
    pub fn new(warehouse: Arc<dyn WarehouseClient>, ambient_project: impl Into<String>) -> Self {
        Self {
            warehouse,
            ambient_project: ambient_project.into(),
            labels: BTreeMap::new(),
            params: Vec::new(),
            maximum_bytes_billed: None,
            dry_run: false,
            concurrency: None,
            rate_limiter: None,
        }
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_params(mut self, params: Vec<QueryParameter>) -> Self {
        self.params = params;
        self
    }

    pub fn with_maximum_bytes_billed(mut self, max: Option<u64>) -> Self {
        self.maximum_bytes_billed = max;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Bound how many deploys may call through to the warehouse at once.
    /// Shared with [`crate::Reconciler`] so the whole run respects one
    /// `--threads`-sized pool, not one per stage.
    pub fn with_concurrency(mut self, semaphore: Arc<Semaphore>) -> Self {
        self.concurrency = Some(semaphore);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Dispatches one file's deploy. Predecessor waiting happens in the
    /// planner's task closure, *before* this is called — a scheduling
    /// permit is only held for the span of the actual warehouse work below,
    /// never while blocked on another task (spec §5: "long-running tasks do
    /// not block scheduling of independent others").
    pub async fn deploy(&self, job: &FileJob) -> Result<Option<String>, ExecuteError> {
        let span = tracing::info_span!("deploy", namespace = %job.file.namespace, file = job.filename());
        async {
            let _permit = match &self.concurrency {
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }

            if job.filename() == "view.sql" {
                self.deploy_view(job).await
            } else {
                self.deploy_statement(job).await
            }
        }
        .instrument(span)
        .await
    }

    async fn deploy_view(&self, job: &FileJob) -> Result<Option<String>, ExecuteError> {
        let dest = job.file.namespace.clone();
        let qualified = dest.normalize(&self.ambient_project, false);
        let sql = format!("CREATE OR REPLACE VIEW `{qualified}` AS\n{}", job.file.sql);

        if self.dry_run {
            let mut config = QueryJobConfig::new(sql);
            config.dry_run = true;
            let meta = self.warehouse.run_query_job(config).await?;
            return Ok(meta.stats_message());
        }

        let resource = if self.warehouse.table_exists(&dest).await? {
            self.warehouse.get_table(&dest).await?
        } else {
            self.warehouse.create_view(&dest, &job.file.sql).await?
        };
        self.sync_if_owner(&resource, job).await;
        Ok(None)
    }

    async fn deploy_statement(&self, job: &FileJob) -> Result<Option<String>, ExecuteError> {
        let mut config = QueryJobConfig::new(job.file.sql.clone());
        config.priority = JobPriority::Batch;
        config.labels = self.labels.clone();
        config.labels.insert("bqport".to_string(), "true".to_string());
        config.job_id_prefix = format!(
            "bqport-{}_{}-",
            job.file.namespace.dataset,
            job.file.namespace.name.as_deref().unwrap_or("schema")
        );
        config.dry_run = self.dry_run;
        config.maximum_bytes_billed = self.maximum_bytes_billed;
        config.params = self.params.clone();

        let meta = self.warehouse.run_query_job(config).await?;
        if let Some(error) = &meta.error_result {
            return Err(WarehouseError::JobFailed(error.clone()).into());
        }
        if self.dry_run {
            return Ok(meta.stats_message());
        }

        let resource = self.resolve_resource(&meta, job).await?;
        if resource.id() == &job.file.namespace {
            self.sync_if_owner(&resource, job).await;
        }
        Ok(meta.stats_message())
    }

    async fn resolve_resource(&self, meta: &JobMetadata, job: &FileJob) -> Result<Resource, ExecuteError> {
        use StatementType::*;
        match &meta.statement_type {
            Some(Script) => self.resolve_script(meta).await,
            Some(CreateSchema) | Some(DropSchema) | Some(AlterSchema) => {
                Ok(self.warehouse.get_dataset(&job.file.namespace.owning_dataset()).await?)
            }
            Some(CreateFunction) | Some(CreateTableFunction) | Some(DropFunction) | Some(CreateProcedure)
            | Some(DropProcedure) => {
                let target = meta.ddl_target_routine.clone().unwrap_or_else(|| job.file.namespace.clone());
                Ok(self.warehouse.get_routine(&target).await?)
            }
            Some(CreateTable)
            | Some(CreateView)
            | Some(CreateMaterializedView)
            | Some(CreateTableAsSelect)
            | Some(DropTable)
            | Some(DropView)
            | Some(DropMaterializedView)
            | Some(AlterTable)
            | Some(AlterView)
            | Some(Insert)
            | Some(Update)
            | Some(Delete)
            | Some(Merge) => {
                let target = meta.ddl_target_table.clone().unwrap_or_else(|| job.file.namespace.clone());
                Ok(self.warehouse.get_table(&target).await?)
            }
            Some(CreateRowAccessPolicy) | Some(DropRowAccessPolicy) | Some(CreateModel) | Some(ExportModel) => {
                Err(ExecuteError::Unsupported(format!("{:?}", meta.statement_type)))
            }
            Some(Other(tag)) => Err(ExecuteError::Unsupported(format!("statement type {tag}: {}", meta.stats_dump()))),
            None => Err(ExecuteError::Unsupported(meta.stats_dump())),
        }
    }

    async fn resolve_script(&self, meta: &JobMetadata) -> Result<Resource, ExecuteError> {
        for child in self.warehouse.child_jobs(&meta.job_id).await? {
            if let Some(table) = &child.ddl_target_table {
                if let Ok(resource) = self.warehouse.get_table(table).await {
                    return Ok(resource);
                }
            }
            if let Some(routine) = &child.ddl_target_routine {
                if let Ok(resource) = self.warehouse.get_routine(routine).await {
                    return Ok(resource);
                }
            }
        }
        Err(ExecuteError::Unsupported("script produced no resolvable child job".to_string()))
    }

    async fn sync_if_owner(&self, resource: &Resource, job: &FileJob) {
        let dir = job.file.path.parent().unwrap_or_else(|| Path::new("."));
        if let Err(error) = self.warehouse.sync_metadata(resource, dir, true).await {
            tracing::warn!(%error, namespace = %job.file.namespace, "metadata sync failed after a successful deploy");
        }
    }
}

/// Build a `--parameter name:type:value` entry. An empty name marks a
/// positional parameter; `"NULL"` (case-sensitive) always resolves to a
/// null value regardless of the declared type.
pub fn parse_parameter(spec: &str) -> Result<QueryParameter, String> {
    let mut parts = spec.splitn(3, ':');
    let (Some(name), Some(ty), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("malformed --parameter (want name:type:value): {spec}"));
    };
    let value = if value == "NULL" {
        ParamValue::Null
    } else if ty.eq_ignore_ascii_case("int64") || ty.eq_ignore_ascii_case("integer") {
        value
            .parse::<i64>()
            .map(ParamValue::Int64)
            .map_err(|_| format!("not an integer: {value}"))?
    } else {
        ParamValue::String(value.to_string())
    };
    Ok(QueryParameter {
        name: if name.is_empty() { None } else { Some(name.to_string()) },
        value,
    })
}

/// Build a `--label key:value` entry.
pub fn parse_label(spec: &str) -> Result<(String, String), String> {
    let (key, value) = spec
        .split_once(':')
        .ok_or_else(|| format!("malformed --label (want key:value): {spec}"))?;
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
