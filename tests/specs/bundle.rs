use crate::prelude::*;

#[test]
fn bundle_emits_sql_for_a_single_table() {
    let project = Project::empty();
    project.file("@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");

    project
        .bqp()
        .args(&["bundle", "--root-path", ".", "--project", "proj"])
        .passes()
        .stdout_has("CREATE TABLE ds.tbl (x INT64)")
        .stdout_has("ds/tbl/ddl.sql");
}

#[test]
fn bundle_orders_a_dependent_view_after_its_source_table() {
    let project = Project::empty();
    project.file("@default/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    project.file("@default/ds/v/view.sql", "SELECT x FROM ds.tbl");

    let run = project
        .bqp()
        .args(&["bundle", "--root-path", ".", "--project", "proj"])
        .passes();

    let stdout = run.stdout();
    let tbl_pos = stdout.find("ds/tbl/ddl.sql").expect("table path should appear");
    let view_pos = stdout.find("ds/v/view.sql").expect("view path should appear");
    assert!(tbl_pos < view_pos, "table should be bundled before the view that reads it");
}

#[test]
fn bundle_suppresses_a_non_recursive_cte_name_from_the_dependency_graph() {
    let project = Project::empty();
    project.file(
        "@default/ds/v/view.sql",
        "WITH recent AS (SELECT 1 AS x) SELECT x FROM recent",
    );

    // The CTE name "recent" must not be resolved as an external table
    // reference, so this bundles cleanly with only one statement.
    project
        .bqp()
        .args(&["bundle", "--root-path", ".", "--project", "proj"])
        .passes()
        .stdout_has("WITH recent AS");
}

#[test]
fn bundle_restricts_to_the_named_projects() {
    let project = Project::empty();
    project.file("alpha/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (x INT64)");
    project.file("beta/ds/tbl/ddl.sql", "CREATE TABLE ds.tbl (y INT64)");

    project
        .bqp()
        .args(&["bundle", "alpha", "--root-path", "."])
        .passes()
        .stdout_has("x INT64")
        .stdout_lacks("y INT64");
}
