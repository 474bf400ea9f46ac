// SPDX-License-Identifier: MIT

use super::*;
use yare::parameterized;

#[parameterized(
    pending = { TaskStatus::Pending, ' ' },
    running = { TaskStatus::Running, '⠋' },
    success = { TaskStatus::Success { message: None }, '✔' },
    failed = { TaskStatus::Failed { error: "boom".to_string() }, '✘' },
)]
fn glyph_matches_status(status: TaskStatus, expected: char) {
    assert_eq!(glyph(&status), expected);
}

#[test]
fn spinner_frame_cycles() {
    let first = spinner_frame(0);
    let wrapped = spinner_frame(SPINNER_FRAMES.len() as u64);
    assert_eq!(first, wrapped);
}

#[test]
fn annotation_carries_the_success_message() {
    let status = TaskStatus::Success {
        message: Some("created".to_string()),
    };
    assert_eq!(annotation(&status), Some("created"));
}

#[test]
fn annotation_carries_the_failure_error() {
    let status = TaskStatus::Failed {
        error: "timed out".to_string(),
    };
    assert_eq!(annotation(&status), Some("timed out"));
}

#[test]
fn annotation_is_none_while_pending_or_running() {
    assert_eq!(annotation(&TaskStatus::Pending), None);
    assert_eq!(annotation(&TaskStatus::Running), None);
}
