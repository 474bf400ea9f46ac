// SPDX-License-Identifier: MIT

use super::*;
use std::fs;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn scan_finds_every_sql_file_and_skips_metadata() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    write(root, "@default/ds/tbl/metadata.json", "{}");
    write(root, "@default/ds/ddl.sql", "CREATE SCHEMA ds");

    let files = scan(root, "proj").unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.path.extension().unwrap() == "sql"));
}

#[test]
fn scanned_files_carry_their_resolved_namespace() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");

    let files = scan(root, "proj").unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].namespace.project, "proj");
    assert_eq!(files[0].namespace.dataset, "ds");
    assert_eq!(files[0].namespace.name.as_deref(), Some("tbl"));
}

#[test]
fn filter_by_project_keeps_only_named_projects() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "alpha/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    write(root, "beta/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");

    let files = scan(root, "proj").unwrap();
    let filtered = filter_by_project(files, &["alpha".to_string()]);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].namespace.project, "alpha");
}

#[test]
fn filter_by_project_is_a_no_op_when_empty() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "alpha/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");

    let files = scan(root, "proj").unwrap();
    let filtered = filter_by_project(files, &[]);
    assert_eq!(filtered.len(), 1);
}
