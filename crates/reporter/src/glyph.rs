// SPDX-License-Identifier: MIT

//! Maps task status to the single-character glyphs and spinner frames drawn
//! in front of each row of the progress tree.

use bqp_core::TaskStatus;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_frame(tick: u64) -> char {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// A single glyph character for a status that doesn't need an animation
/// tick (pending/success/failed); `Running` is handled by the caller via
/// [`spinner_frame`] since it needs the current tick. `Pending` renders as a
/// blank space — a task that hasn't started yet draws no attention to
/// itself in the tree (spec.md §4.8: "pending → invisible").
pub fn glyph(status: &TaskStatus) -> char {
    match status {
        TaskStatus::Pending => ' ',
        TaskStatus::Running => '⠋',
        TaskStatus::Success { .. } => '✔',
        TaskStatus::Failed { .. } => '✘',
    }
}

/// A one-line annotation to append after the task name: the success message
/// if present, or the error text for a failure. `None` for pending/running.
pub fn annotation(status: &TaskStatus) -> Option<&str> {
    match status {
        TaskStatus::Success { message } => message.as_deref(),
        TaskStatus::Failed { error } => Some(error.as_str()),
        TaskStatus::Pending | TaskStatus::Running => None,
    }
}

#[cfg(test)]
#[path = "glyph_tests.rs"]
mod tests;
