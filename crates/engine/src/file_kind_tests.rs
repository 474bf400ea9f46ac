// SPDX-License-Identifier: MIT

use super::*;

#[yare::parameterized(
    ddl_sql_is_always_ddl = { "ddl.sql", "-- anything", FileKind::Ddl },
    view_sql_is_always_ddl = { "view.sql", "SELECT 1", FileKind::Ddl },
    create_statement_is_ddl = { "query.sql", "CREATE TABLE t (x INT64)", FileKind::Ddl },
    insert_statement_is_dml = { "query.sql", "INSERT INTO t VALUES (1)", FileKind::Dml },
    merge_statement_is_dml = { "query.sql", "MERGE INTO t USING s ON true", FileKind::Dml },
    select_statement_is_query = { "query.sql", "SELECT * FROM t", FileKind::Query },
    leading_whitespace_is_ignored = { "query.sql", "\n\n  SELECT 1", FileKind::Query },
)]
fn classify(filename: &str, sql: &str, expected: FileKind) {
    assert_eq!(FileKind::classify(filename, sql), expected);
}

#[test]
fn rank_orders_ddl_before_dml_before_query() {
    assert!(FileKind::Ddl.rank() < FileKind::Dml.rank());
    assert!(FileKind::Dml.rank() < FileKind::Query.rank());
}
