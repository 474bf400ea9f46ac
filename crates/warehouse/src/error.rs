// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum WarehouseError {
    #[error("rpc failed: {0}")]
    Rpc(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    JobFailed(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}
