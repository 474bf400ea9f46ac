use crate::prelude::*;

#[test]
fn dry_run_push_deploys_a_single_table_without_mutating_anything() {
    let project = Project::empty();
    project.file("@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");

    project
        .bqp()
        .args(&["push", "--root-path", ".", "--dry-run"])
        .passes()
        .stdout_has("deployed: 1 succeeded, 0 failed");
}

#[test]
fn dry_run_push_deploys_every_file_in_the_local_tree() {
    let project = Project::empty();
    project.file("@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    project.file("@default/ds/v/view.sql", "SELECT x FROM ds.tbl");

    project
        .bqp()
        .args(&["push", "--root-path", ".", "--dry-run"])
        .passes()
        .stdout_has("deployed: 2 succeeded, 0 failed");
}

#[test]
fn push_restricts_deployment_to_the_named_projects() {
    let project = Project::empty();
    project.file("alpha/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    project.file("beta/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (y INT64)");

    project
        .bqp()
        .args(&["push", "alpha", "--root-path", ".", "--dry-run"])
        .passes()
        .stdout_has("deployed: 1 succeeded, 0 failed");
}

#[test]
fn push_reports_an_empty_tree_as_nothing_deployed() {
    let project = Project::empty();

    project
        .bqp()
        .args(&["push", "--root-path", ".", "--dry-run"])
        .passes()
        .stdout_has("deployed: 0 succeeded, 0 failed");
}
