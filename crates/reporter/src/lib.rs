// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bqp-reporter: the terminal progress display driven while a plan's tasks
//! run, plus its JSON sibling for piped/non-interactive output.

pub mod console;
pub mod frame;
pub mod glyph;
pub mod tree;

use bqp_core::Task;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

/// How often the reporter repaints while any task is still in flight.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Drives a redraw loop over a fixed set of named tasks until every one of
/// them reaches a terminal status, printing to stdout.
pub struct Reporter {
    entries: Vec<(String, Arc<Task>)>,
    format: OutputFormat,
}

impl Reporter {
    pub fn new(entries: Vec<(String, Arc<Task>)>, format: OutputFormat) -> Self {
        Self { entries, format }
    }

    fn all_done(&self) -> bool {
        self.entries.iter().all(|(_, task)| task.done())
    }

    /// Render one frame's content, with no ANSI wrapping.
    pub fn render_once(&self, tick: u64) -> String {
        match self.format {
            OutputFormat::Text => {
                let root = tree::build(&self.entries);
                console::render(&root, tick)
            }
            OutputFormat::Json => {
                let rows: Vec<_> = self
                    .entries
                    .iter()
                    .map(|(name, task)| serde_json::json!({ "name": name, "status": task.status() }))
                    .collect();
                format!(
                    "{}\n",
                    serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
                )
            }
        }
    }

    /// Repaint stdout roughly every [`REDRAW_INTERVAL`] until every tracked
    /// task has reached a terminal status. On a non-TTY stream (piped or
    /// redirected output) each frame is appended rather than redrawn in
    /// place.
    pub async fn run(&self) {
        let is_tty = std::io::stdout().is_terminal();
        let mut tick = 0u64;
        loop {
            let content = self.render_once(tick);
            print!("{}", frame::render_frame(&content, is_tty));
            {
                use std::io::Write as _;
                let _ = std::io::stdout().flush();
            }
            if self.all_done() {
                break;
            }
            tick = tick.wrapping_add(1);
            tokio::time::sleep(REDRAW_INTERVAL).await;
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
