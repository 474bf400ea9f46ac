// SPDX-License-Identifier: MIT

//! [`Task`] — a named unit of asynchronous work with a monotonic lifecycle
//! lifecycle.

use std::future::Future;
use std::pin::Pin;
use tokio::sync::{watch, Mutex};

/// Observable status of a [`Task`]. Transitions only
/// `Pending -> Running -> {Success, Failed}`, never backwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TaskStatus {
    Pending,
    Running,
    Success { message: Option<String> },
    Failed { error: String },
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success { .. } | TaskStatus::Failed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskStatus::Failed { .. })
    }
}

type Work = Pin<Box<dyn Future<Output = Result<Option<String>, String>> + Send>>;

/// A named unit of work. `run()` may be called any number of times
/// concurrently: the first caller to observe `Pending` executes the closure
/// and drives the status transition; every other caller (concurrent or
/// later) is a no-op: multiple Tasks may run in parallel, but a
/// single Task's run() is serialized" contract.
pub struct Task {
    name: String,
    status: watch::Sender<TaskStatus>,
    work: Mutex<Option<Work>>,
}

impl Task {
    pub fn new<F>(name: impl Into<String>, work: F) -> Self
    where
        F: Future<Output = Result<Option<String>, String>> + Send + 'static,
    {
        let (status, _) = watch::channel(TaskStatus::Pending);
        Self {
            name: name.into(),
            status,
            work: Mutex::new(Some(Box::pin(work))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TaskStatus {
        self.status.borrow().clone()
    }

    pub fn done(&self) -> bool {
        self.status().is_terminal()
    }

    /// Run the task's closure, transitioning `Pending -> Running ->
    /// {Success, Failed}`. Idempotent: a no-op if status is not `Pending`.
    pub async fn run(&self) {
        let mut guard = self.work.lock().await;
        if self.status().is_terminal() || matches!(self.status(), TaskStatus::Running) {
            return;
        }
        let work = match guard.take() {
            Some(w) => w,
            None => return,
        };
        let _ = self.status.send(TaskStatus::Running);
        drop(guard);

        let result = work.await;
        let next = match result {
            Ok(message) => TaskStatus::Success { message },
            Err(error) => TaskStatus::Failed {
                error: error.trim().to_string(),
            },
        };
        let _ = self.status.send(next);
    }

    /// Await this task's completion future, returning its terminal status.
    pub async fn wait(&self) -> TaskStatus {
        let mut rx = self.status.subscribe();
        loop {
            let current = rx.borrow().clone();
            if current.is_terminal() {
                return current;
            }
            if rx.changed().await.is_err() {
                return self.status();
            }
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
