// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bqp-warehouse: the pluggable warehouse client interface, its query-job
//! and resource types, and a token-bucket RPC throttle. The client itself is
//! pluggable and intentionally left outside this workspace.

pub mod client;
pub mod error;
pub mod job;
pub mod rate_limiter;
pub mod resource;

pub use client::WarehouseClient;
pub use error::WarehouseError;
pub use job::{JobMetadata, JobPriority, ParamValue, QueryJobConfig, QueryParameter, StatementType};
pub use rate_limiter::RateLimiter;
pub use resource::{Resource, ResourceMetadata};

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWarehouseClient, WarehouseCall};
