// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn display_includes_name_when_present() {
    let id = ResourceId::new("proj", "ds", "tbl", ResourceKind::Table);
    assert_eq!(id.to_string(), "proj.ds.tbl");
}

#[test]
fn display_schema_only_has_two_segments() {
    let id = ResourceId::schema("proj", "ds");
    assert_eq!(id.to_string(), "proj.ds");
}

#[test]
fn owning_dataset_drops_name_and_becomes_schema_kind() {
    let id = ResourceId::new("proj", "ds", "tbl", ResourceKind::Table);
    let owner = id.owning_dataset();
    assert_eq!(owner.kind, ResourceKind::Schema);
    assert_eq!(owner.name, None);
    assert_eq!(owner.to_string(), "proj.ds");
}

#[yare::parameterized(
    empty_project_uses_ambient = { "", "ds", Some("tbl"), "ambient", false, "ambient.ds.tbl" },
    explicit_project_kept      = { "other", "ds", Some("tbl"), "ambient", false, "other.ds.tbl" },
    schema_only_drops_name     = { "", "ds", Some("tbl"), "ambient", true, "ambient.ds" },
    no_name_at_all             = { "", "ds", None, "ambient", false, "ambient.ds" },
)]
fn normalize(
    project: &str,
    dataset: &str,
    name: Option<&str>,
    ambient: &str,
    schema_only: bool,
    expected: &str,
) {
    let id = ResourceId {
        project: project.to_string(),
        dataset: dataset.to_string(),
        name: name.map(String::from),
        kind: ResourceKind::Table,
    };
    assert_eq!(id.normalize(ambient, schema_only), expected);
}

fn current() -> ResourceId {
    ResourceId::schema("ambient", "ds")
}

#[test]
fn parse_identifier_bare_name_resolves_in_current_dataset() {
    let id = parse_identifier("tbl", ResourceKind::Table, "ambient", &current()).unwrap();
    assert_eq!(id, ResourceId::new("ambient", "ds", "tbl", ResourceKind::Table));
}

#[test]
fn parse_identifier_two_segments_is_dataset_dot_name() {
    let id = parse_identifier("other_ds.tbl", ResourceKind::Table, "ambient", &current()).unwrap();
    assert_eq!(id, ResourceId::new("ambient", "other_ds", "tbl", ResourceKind::Table));
}

#[test]
fn parse_identifier_three_segments_is_fully_qualified() {
    let id = parse_identifier("p.ds2.tbl", ResourceKind::Table, "ambient", &current()).unwrap();
    assert_eq!(id, ResourceId::new("p", "ds2", "tbl", ResourceKind::Table));
}

#[test]
fn parse_identifier_schema_kind_one_segment_is_dataset() {
    let id = parse_identifier("ds2", ResourceKind::Schema, "ambient", &current()).unwrap();
    assert_eq!(id, ResourceId::schema("ambient", "ds2"));
}

#[test]
fn parse_identifier_rejects_too_many_segments() {
    let err = parse_identifier("a.b.c.d", ResourceKind::Table, "ambient", &current());
    assert!(err.is_err());
}

#[test]
fn parse_identifier_rejects_empty_text() {
    let err = parse_identifier("", ResourceKind::Table, "ambient", &current());
    assert!(err.is_err());
}
