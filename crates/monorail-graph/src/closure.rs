//! Reachability queries over a dependency map.
//!
//! # Edge Direction
//!
//! Edges point `consumer → dependency`. Upstream follows them forward (what a
//! project needs), downstream follows them backward (what needs a project).

use std::collections::BTreeSet;

use monorail_core::edge::DependencyMap;
use monorail_core::id::ProjectId;
use petgraph::visit::{Bfs, Reversed, Walker};

use crate::graph::DependencyGraph;

/// Every project `root` depends on, transitively, including `root` itself.
pub fn upstream(map: &DependencyMap, root: &ProjectId) -> BTreeSet<ProjectId> {
    let graph = DependencyGraph::from_map(map);
    let Some(start) = graph.find(root) else {
        return BTreeSet::from([root.clone()]);
    };
    Bfs::new(graph.inner(), start)
        .iter(graph.inner())
        .map(|idx| graph.node(idx).clone())
        .collect()
}

/// Every project depending on `root`, transitively, including `root` itself.
pub fn downstream(map: &DependencyMap, root: &ProjectId) -> BTreeSet<ProjectId> {
    let graph = DependencyGraph::from_map(map);
    let Some(start) = graph.find(root) else {
        return BTreeSet::from([root.clone()]);
    };
    let reversed = Reversed(graph.inner());
    Bfs::new(reversed, start)
        .iter(reversed)
        .map(|idx| graph.node(idx).clone())
        .collect()
}

/// A shortest dependency path `from → … → to`, both ends included.
///
/// Explains why `from` depends on `to`; `path(map, x, x)` is `[x]`.
pub fn path(map: &DependencyMap, from: &ProjectId, to: &ProjectId) -> Option<Vec<ProjectId>> {
    DependencyGraph::from_map(map).path(from, to)
}
