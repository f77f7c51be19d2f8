use std::collections::BTreeSet;

use monorail_core::edge::{DependencyEdge, DependencyMap};
use monorail_core::id::ProjectId;
use monorail_graph::closure::{downstream, path, upstream};
use proptest::prelude::*;

fn id(s: &str) -> ProjectId {
    ProjectId::parse(s).unwrap()
}

fn ids(list: &[&str]) -> BTreeSet<ProjectId> {
    list.iter().map(|s| id(s)).collect()
}

fn map(entries: Vec<(&str, Vec<&str>)>) -> DependencyMap {
    entries
        .into_iter()
        .map(|(key, deps)| {
            let edges: BTreeSet<DependencyEdge> =
                deps.into_iter().map(|d| DependencyEdge::new(id(d))).collect();
            (id(key), edges)
        })
        .collect()
}

fn sample() -> DependencyMap {
    map(vec![
        ("a", vec![]),
        ("b", vec!["a"]),
        ("c", vec!["a", "b"]),
        ("x", vec!["b"]),
        ("y", vec!["c"]),
    ])
}

#[test]
fn upstream_follows_dependencies() {
    assert_eq!(upstream(&sample(), &id("y")), ids(&["a", "b", "c", "y"]));
    assert_eq!(upstream(&sample(), &id("a")), ids(&["a"]));
}

#[test]
fn downstream_follows_dependents() {
    assert_eq!(
        downstream(&sample(), &id("a")),
        ids(&["a", "b", "c", "x", "y"])
    );
    assert_eq!(downstream(&sample(), &id("x")), ids(&["x"]));
}

#[test]
fn closures_tolerate_cycles() {
    let cyclic = map(vec![("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]);
    assert_eq!(upstream(&cyclic, &id("a")), ids(&["a", "b", "c"]));
    assert_eq!(downstream(&cyclic, &id("b")), ids(&["a", "b", "c"]));
}

#[test]
fn upstream_includes_external_dependencies() {
    let m = map(vec![("app", vec!["org.clojure/clojure"])]);
    assert_eq!(
        upstream(&m, &id("app")),
        ids(&["app", "org.clojure/clojure"])
    );
}

#[test]
fn unknown_root_is_its_own_closure() {
    assert_eq!(upstream(&sample(), &id("zzz")), ids(&["zzz"]));
    assert_eq!(downstream(&sample(), &id("zzz")), ids(&["zzz"]));
}

#[test]
fn path_explains_dependency() {
    assert_eq!(
        path(&sample(), &id("y"), &id("a")),
        Some(vec![id("y"), id("c"), id("a")])
    );
    assert_eq!(path(&sample(), &id("a"), &id("y")), None);
}

proptest! {
    #[test]
    fn closures_contain_root(
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..15),
        root in 0usize..6,
    ) {
        let names = ["a", "b", "c", "d", "e", "f"];
        let mut m: DependencyMap = names
            .iter()
            .map(|n| (id(n), BTreeSet::new()))
            .collect();
        for (from, to) in edges {
            let mut set = m.edges_of(&id(names[from])).cloned().unwrap_or_default();
            set.insert(DependencyEdge::new(id(names[to])));
            m.insert(id(names[from]), set);
        }
        let root = id(names[root]);
        prop_assert!(upstream(&m, &root).contains(&root));
        prop_assert!(downstream(&m, &root).contains(&root));

        // n is upstream of root exactly when root is downstream of n.
        for n in upstream(&m, &root) {
            prop_assert!(downstream(&m, &n).contains(&root));
        }
    }
}
