use std::collections::BTreeSet;

use monorail_core::edge::{DependencyEdge, DependencyMap};
use monorail_core::errors::MonorailError;
use monorail_core::id::ProjectId;

#[test]
fn test_manifest_error_display() {
    let err = MonorailError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_unresolved_name_display() {
    let err = MonorailError::UnresolvedName {
        name: ProjectId::short("qux"),
    };
    assert_eq!(
        err.to_string(),
        "Could not resolve `qux` to any project in the repository"
    );
}

#[test]
fn test_ambiguous_name_lists_candidates() {
    let err = MonorailError::AmbiguousName {
        name: ProjectId::short("baz"),
        candidates: vec![ProjectId::new("bar", "baz"), ProjectId::new("foo", "baz")],
    };
    assert_eq!(
        err.to_string(),
        "Name `baz` is ambiguous; it could refer to: bar/baz, foo/baz"
    );
}

#[test]
fn test_cycle_detected_lists_cycles() {
    let a = ProjectId::short("a");
    let b = ProjectId::short("b");
    let residual: DependencyMap = [
        (a.clone(), BTreeSet::from([DependencyEdge::new(b.clone())])),
        (b.clone(), BTreeSet::from([DependencyEdge::new(a.clone())])),
    ]
    .into_iter()
    .collect();
    let err = MonorailError::CycleDetected {
        cycles: vec![vec![a, b]],
        residual,
    };
    assert_eq!(err.to_string(), "Dependency cycle detected among: [a, b]");
}

#[test]
fn test_error_converts_to_miette_report() {
    let err = MonorailError::UnresolvedName {
        name: ProjectId::short("qux"),
    };
    let report: miette::Report = err.into();
    assert!(report.to_string().contains("qux"));
}
