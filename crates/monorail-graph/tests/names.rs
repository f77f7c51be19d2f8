use std::collections::BTreeSet;

use monorail_core::errors::MonorailError;
use monorail_core::id::ProjectId;
use monorail_graph::names::{condense, resolve, resolve_strict, Resolution};

fn id(s: &str) -> ProjectId {
    ProjectId::parse(s).unwrap()
}

fn names(ids: &[&str]) -> BTreeSet<ProjectId> {
    ids.iter().map(|s| id(s)).collect()
}

#[test]
fn condense_collapses_matching_group() {
    assert_eq!(condense(&id("foo/foo")), id("foo"));
    assert_eq!(condense(&id("foo")), id("foo"));
    assert_eq!(condense(&id("baz/foo")), id("baz/foo"));
}

#[test]
fn resolve_examples() {
    let valid = names(&["foo", "baz/foo", "example/bar", "example/baz"]);
    assert_eq!(resolve(&valid, &id("qux")), Resolution::NotFound);
    assert_eq!(resolve(&valid, &id("foo")), Resolution::Found(id("foo")));
    assert_eq!(resolve(&valid, &id("foo/foo")), Resolution::Found(id("foo")));
    assert_eq!(
        resolve(&valid, &id("bar")),
        Resolution::Found(id("example/bar"))
    );
    assert_eq!(
        resolve(&valid, &id("baz")),
        Resolution::Found(id("example/baz"))
    );
}

#[test]
fn resolve_ambiguous_short_name() {
    let valid = names(&["foo/baz", "bar/baz", "bar/qux"]);
    assert_eq!(
        resolve(&valid, &id("baz")),
        Resolution::Ambiguous(names(&["foo/baz", "bar/baz"]))
    );
}

#[test]
fn qualified_name_never_falls_back() {
    let valid = names(&["example/bar"]);
    assert_eq!(resolve(&valid, &id("other/bar")), Resolution::NotFound);
}

#[test]
fn strict_unresolved() {
    let valid = names(&["foo"]);
    let err = resolve_strict(&valid, &id("qux")).unwrap_err();
    match err {
        MonorailError::UnresolvedName { name } => assert_eq!(name, id("qux")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_ambiguous_carries_sorted_candidates() {
    let valid = names(&["foo/baz", "bar/baz", "bar/qux"]);
    let err = resolve_strict(&valid, &id("baz")).unwrap_err();
    match err {
        MonorailError::AmbiguousName { name, candidates } => {
            assert_eq!(name, id("baz"));
            assert_eq!(candidates, vec![id("bar/baz"), id("foo/baz")]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_found() {
    let valid = names(&["example/bar"]);
    assert_eq!(resolve_strict(&valid, &id("bar")).unwrap(), id("example/bar"));
}
