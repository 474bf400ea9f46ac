// SPDX-License-Identifier: MIT

use super::*;
use crate::tree;
use bqp_core::Task;
use std::sync::Arc;

#[tokio::test]
async fn leaf_tasks_render_with_their_name_and_no_glyph_while_pending() {
    let task = Arc::new(Task::new("p.ds.tbl/ddl.sql", async { Ok(None) }));
    let root = tree::build(&[("p.ds.tbl/ddl.sql".to_string(), task)]);
    let rendered = render(&root, 0);
    assert!(rendered.contains("ddl.sql"));
    let leaf_line = rendered.lines().find(|l| l.contains("ddl.sql")).unwrap();
    assert!(leaf_line.trim_start().starts_with("ddl.sql"));
}

#[tokio::test]
async fn a_successful_task_shows_its_message() {
    let task = Arc::new(Task::new("p.ds.tbl/ddl.sql", async {
        Ok(Some("created".to_string()))
    }));
    task.run().await;
    let root = tree::build(&[("p.ds.tbl/ddl.sql".to_string(), task)]);
    let rendered = render(&root, 0);
    assert!(rendered.contains("created"));
    assert!(rendered.contains('✔'));
}

#[tokio::test]
async fn a_failed_task_shows_its_error_on_an_indented_second_line() {
    let task = Arc::new(Task::new("p.ds.tbl/ddl.sql", async {
        Err("syntax error near SELECT".to_string())
    }));
    task.run().await;
    let root = tree::build(&[("p.ds.tbl/ddl.sql".to_string(), task)]);
    let rendered = render(&root, 0);

    let mut lines = rendered.lines();
    let leaf_line = lines.find(|l| l.contains("ddl.sql")).unwrap();
    assert!(leaf_line.contains('✘'));
    assert!(!leaf_line.contains("syntax error"));

    let error_line = lines.next().unwrap();
    assert!(error_line.contains("syntax error near SELECT"));
    assert!(error_line.len() - error_line.trim_start().len() > 0);
}

#[tokio::test]
async fn intermediate_segments_get_no_glyph() {
    let task = Arc::new(Task::new("p.ds.tbl/ddl.sql", async { Ok(None) }));
    let root = tree::build(&[("p.ds.tbl/ddl.sql".to_string(), task)]);
    let rendered = render(&root, 0);
    let namespace_line = rendered.lines().next().unwrap();
    assert_eq!(namespace_line.trim(), "p.ds.tbl");
}
