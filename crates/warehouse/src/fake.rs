// SPDX-License-Identifier: MIT

//! [`FakeWarehouseClient`] — a hand-scripted stand-in for the real
//! warehouse, used by `bqp-engine` and `bqp-cli`'s tests.

use crate::client::WarehouseClient;
use crate::error::WarehouseError;
use crate::job::{JobMetadata, QueryJobConfig};
use crate::resource::{Resource, ResourceMetadata};
use async_trait::async_trait;
use bqp_core::ResourceId;
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseCall {
    RunQueryJob { sql: String, dry_run: bool },
    GetDataset(ResourceId),
    GetTable(ResourceId),
    GetRoutine(ResourceId),
    TableExists(ResourceId),
    CreateView(ResourceId),
    ListTables(ResourceId),
    ListRoutines(ResourceId),
    ListModels(ResourceId),
    DeleteResource(ResourceId),
    SyncMetadata { id: ResourceId, push: bool },
}

#[derive(Default)]
struct State {
    calls: Vec<WarehouseCall>,
    job_responses: VecDeque<Result<JobMetadata, WarehouseError>>,
    resources: BTreeMap<ResourceId, Resource>,
    table_listing: BTreeMap<ResourceId, Vec<ResourceId>>,
    routine_listing: BTreeMap<ResourceId, Vec<ResourceId>>,
    model_listing: BTreeMap<ResourceId, Vec<ResourceId>>,
    deleted: Vec<ResourceId>,
    fail_deletes: bool,
}

pub struct FakeWarehouseClient {
    project_id: String,
    state: Mutex<State>,
}

impl FakeWarehouseClient {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn queue_job_response(&self, response: Result<JobMetadata, WarehouseError>) {
        self.state.lock().job_responses.push_back(response);
    }

    pub fn put_resource(&self, resource: Resource) {
        self.state.lock().resources.insert(resource.id().clone(), resource);
    }

    pub fn seed_listing(
        &self,
        dataset: ResourceId,
        tables: Vec<ResourceId>,
        routines: Vec<ResourceId>,
        models: Vec<ResourceId>,
    ) {
        let mut s = self.state.lock();
        s.table_listing.insert(dataset.clone(), tables);
        s.routine_listing.insert(dataset.clone(), routines);
        s.model_listing.insert(dataset, models);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.state.lock().fail_deletes = fail;
    }

    pub fn calls(&self) -> Vec<WarehouseCall> {
        self.state.lock().calls.clone()
    }

    pub fn deleted(&self) -> Vec<ResourceId> {
        self.state.lock().deleted.clone()
    }
}

#[async_trait]
impl WarehouseClient for FakeWarehouseClient {
    async fn project_id(&self) -> String {
        self.project_id.clone()
    }

    async fn run_query_job(&self, config: QueryJobConfig) -> Result<JobMetadata, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::RunQueryJob {
            sql: config.sql.clone(),
            dry_run: config.dry_run,
        });
        s.job_responses
            .pop_front()
            .unwrap_or_else(|| Ok(JobMetadata::default()))
    }

    async fn child_jobs(&self, _parent_job_id: &str) -> Result<Vec<JobMetadata>, WarehouseError> {
        Ok(Vec::new())
    }

    async fn get_dataset(&self, id: &ResourceId) -> Result<Resource, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::GetDataset(id.clone()));
        s.resources
            .get(id)
            .cloned()
            .ok_or_else(|| WarehouseError::NotFound(id.to_string()))
    }

    async fn get_table(&self, id: &ResourceId) -> Result<Resource, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::GetTable(id.clone()));
        s.resources
            .get(id)
            .cloned()
            .ok_or_else(|| WarehouseError::NotFound(id.to_string()))
    }

    async fn get_routine(&self, id: &ResourceId) -> Result<Resource, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::GetRoutine(id.clone()));
        s.resources
            .get(id)
            .cloned()
            .ok_or_else(|| WarehouseError::NotFound(id.to_string()))
    }

    async fn table_exists(&self, id: &ResourceId) -> Result<bool, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::TableExists(id.clone()));
        Ok(s.resources.contains_key(id))
    }

    async fn create_view(&self, id: &ResourceId, _view_sql: &str) -> Result<Resource, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::CreateView(id.clone()));
        let resource = Resource::Table(id.clone());
        s.resources.insert(id.clone(), resource.clone());
        Ok(resource)
    }

    async fn list_tables(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::ListTables(dataset.clone()));
        Ok(s.table_listing.get(dataset).cloned().unwrap_or_default())
    }

    async fn list_routines(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::ListRoutines(dataset.clone()));
        Ok(s.routine_listing.get(dataset).cloned().unwrap_or_default())
    }

    async fn list_models(&self, dataset: &ResourceId) -> Result<Vec<ResourceId>, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::ListModels(dataset.clone()));
        Ok(s.model_listing.get(dataset).cloned().unwrap_or_default())
    }

    async fn delete_resource(&self, id: &ResourceId) -> Result<(), WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::DeleteResource(id.clone()));
        if s.fail_deletes {
            return Err(WarehouseError::Rpc(format!("delete failed: {id}")));
        }
        s.resources.remove(id);
        s.deleted.push(id.clone());
        Ok(())
    }

    async fn sync_metadata(
        &self,
        resource: &Resource,
        _dir: &Path,
        push: bool,
    ) -> Result<ResourceMetadata, WarehouseError> {
        let mut s = self.state.lock();
        s.calls.push(WarehouseCall::SyncMetadata {
            id: resource.id().clone(),
            push,
        });
        Ok(ResourceMetadata::default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
