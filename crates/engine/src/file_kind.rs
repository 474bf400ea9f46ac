// SPDX-License-Identifier: MIT

//! Classifies a file by the kind of SQL it carries, purely to order files
//! within the same namespace deterministically: DDL before DML before plain
//! queries, then by filename.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileKind {
    Ddl,
    Dml,
    Query,
}

impl FileKind {
    /// `ddl.sql` and `view.sql` are always DDL regardless of their body.
    /// Otherwise classify by the statement's leading keyword.
    pub fn classify(filename: &str, sql: &str) -> Self {
        if filename == "ddl.sql" || filename == "view.sql" {
            return FileKind::Ddl;
        }
        let first_word = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .find(|w| !w.is_empty())
            .unwrap_or("")
            .to_ascii_uppercase();
        match first_word.as_str() {
            "INSERT" | "UPDATE" | "DELETE" | "MERGE" => FileKind::Dml,
            "CREATE" | "DROP" | "ALTER" => FileKind::Ddl,
            _ => FileKind::Query,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            FileKind::Ddl => 0,
            FileKind::Dml => 1,
            FileKind::Query => 2,
        }
    }
}

#[cfg(test)]
#[path = "file_kind_tests.rs"]
mod tests;
