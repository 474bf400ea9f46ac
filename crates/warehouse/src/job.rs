// SPDX-License-Identifier: MIT

//! Query job configuration and results.

use bqp_core::ResourceId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPriority {
    Batch,
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int64(i64),
    String(String),
    Null,
}

/// A `--parameter name:type:value` entry. An empty `name` marks a
/// positional parameter.
#[derive(Debug, Clone)]
pub struct QueryParameter {
    pub name: Option<String>,
    pub value: ParamValue,
}

#[derive(Debug, Clone)]
pub struct QueryJobConfig {
    pub sql: String,
    pub priority: JobPriority,
    pub labels: BTreeMap<String, String>,
    pub job_id_prefix: String,
    pub dry_run: bool,
    pub maximum_bytes_billed: Option<u64>,
    pub params: Vec<QueryParameter>,
}

impl QueryJobConfig {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            priority: JobPriority::Batch,
            labels: BTreeMap::new(),
            job_id_prefix: String::new(),
            dry_run: false,
            maximum_bytes_billed: None,
            params: Vec::new(),
        }
    }
}

/// The `statementType` BigQuery-equivalent dispatch tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Script,
    CreateSchema,
    DropSchema,
    AlterSchema,
    CreateFunction,
    CreateTableFunction,
    DropFunction,
    CreateProcedure,
    DropProcedure,
    CreateTable,
    CreateView,
    CreateMaterializedView,
    CreateTableAsSelect,
    DropTable,
    DropView,
    DropMaterializedView,
    AlterTable,
    AlterView,
    Insert,
    Update,
    Delete,
    Merge,
    CreateRowAccessPolicy,
    DropRowAccessPolicy,
    CreateModel,
    ExportModel,
    /// Anything not covered by the table above.
    Other(String),
}

/// Metadata fetched after a query job finishes (or estimated in dry-run).
#[derive(Debug, Clone, Default)]
pub struct JobMetadata {
    pub job_id: String,
    pub statement_type: Option<StatementType>,
    pub error_result: Option<String>,
    pub total_bytes_processed: Option<u64>,
    pub total_bytes_billed: Option<u64>,
    pub ddl_target_table: Option<ResourceId>,
    pub ddl_target_routine: Option<ResourceId>,
    pub elapsed_ms: Option<u64>,
}

impl JobMetadata {
    /// `"<bytes-processed>, <elapsed>"` when statistics are available
    /// once statistics are available.
    pub fn stats_message(&self) -> Option<String> {
        let bytes = self.total_bytes_processed?;
        let elapsed = bqp_core::format_elapsed_ms(self.elapsed_ms.unwrap_or(0));
        Some(format!("{}, {elapsed}", bqp_core::format_bytes(bytes)))
    }

    pub fn stats_dump(&self) -> String {
        format!(
            "statement_type={:?} bytes_processed={:?} bytes_billed={:?}",
            self.statement_type, self.total_bytes_processed, self.total_bytes_billed
        )
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
