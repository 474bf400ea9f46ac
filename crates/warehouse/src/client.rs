// SPDX-License-Identifier: MIT

//! [`WarehouseClient`] — the pluggable warehouse interface the executor and
//! reconciler consume. Deliberately pluggable: the real client lives outside this workspace.

use crate::error::WarehouseError;
use crate::job::{JobMetadata, QueryJobConfig};
use crate::resource::{Resource, ResourceMetadata};
use async_trait::async_trait;
use bqp_core::ResourceId;
use std::path::Path;

/// Safe for concurrent use across many tasks: the warehouse
/// client is built once per run and shared.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    async fn project_id(&self) -> String;

    /// Submit a query job and await its terminal state, fetching metadata.
    /// In dry-run mode the returned metadata carries an estimate only; no
    /// job actually mutates warehouse state.
    async fn run_query_job(&self, config: QueryJobConfig) -> Result<JobMetadata, WarehouseError>;

    /// Child jobs of a `SCRIPT` job, for `ddlTargetTable`/`ddlTargetRoutine`
    /// resolution.
    async fn child_jobs(&self, parent_job_id: &str) -> Result<Vec<JobMetadata>, WarehouseError>;

    async fn get_dataset(&self, id: &ResourceId) -> Result<Resource, WarehouseError>;
    async fn get_table(&self, id: &ResourceId) -> Result<Resource, WarehouseError>;
    async fn get_routine(&self, id: &ResourceId) -> Result<Resource, WarehouseError>;
    async fn table_exists(&self, id: &ResourceId) -> Result<bool, WarehouseError>;

    /// `CREATE OR REPLACE VIEW` path: create the table-as-view resource
    /// directly (used when `view.sql` isn't a dry run and the view doesn't
    /// already exist).
    async fn create_view(&self, id: &ResourceId, view_sql: &str) -> Result<Resource, WarehouseError>;

    /// Fully-qualified ids of every table/view/materialized view the
    /// warehouse reports in `dataset`, for reconciliation.
    async fn list_tables(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError>;
    async fn list_routines(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError>;
    async fn list_models(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError>;

    async fn delete_resource(&self, id: &ResourceId) -> Result<(), WarehouseError>;

    /// Bidirectional metadata mirror between `dir/metadata.json` and the
    /// remote resource. `push = true` writes the remote's current state to
    /// disk.
    async fn sync_metadata(
        &self,
        resource: &Resource,
        dir: &Path,
        push: bool,
    ) -> Result<ResourceMetadata, WarehouseError>;
}
