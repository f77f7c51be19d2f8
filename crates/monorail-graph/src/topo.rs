//! Build ordering: a topological sort that tolerates cycles made only of
//! profile edges.
//!
//! Projects are peeled off the map in layers. A layer holds the *roots* of
//! what remains, i.e. the projects nothing remaining depends on. Roots land
//! at the tail of the output, so the most depended-upon projects come first.
//!
//! When no root exists, the layer is retried with profile edges ignored.
//! That pass breaks cycles introduced by test-only wiring (a library whose
//! `test` profile depends on a project that depends on the library). The
//! first such cycle in a sort is reported as a [`CycleWarning`]. If even
//! that pass finds no root, the cycle is genuine and the sort fails.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use monorail_core::edge::{DependencyEdge, DependencyMap};
use monorail_core::errors::{MonorailError, MonorailResult};
use monorail_core::id::ProjectId;
use serde::Serialize;

use crate::graph::DependencyGraph;

/// A build order plus the diagnostic for the first profile cycle broken
/// while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalOrder {
    pub order: Vec<ProjectId>,
    pub warning: Option<CycleWarning>,
}

/// How the two projects of a broken cycle are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleResolution {
    /// Both ended up in the same layer; their relative order is arbitrary.
    Arbitrary,
    /// The dependency is built before the root.
    DependencyFirst,
}

/// A cycle that was broken by ignoring profile edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleWarning {
    /// The project that became a root once profile edges were ignored.
    pub root: ProjectId,
    /// A dependency of `root` that leads back to it.
    pub dependency: ProjectId,
    /// Profile of the `root → dependency` edge; `None` if unconditional.
    pub dependency_profile: Option<String>,
    /// Profile of the edge closing the cycle back into `root`.
    pub dependent_profile: Option<String>,
    /// Path from `dependency` back to `root`, both included.
    pub back_path: Vec<ProjectId>,
    pub resolution: CycleResolution,
}

impl fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root == self.dependency {
            return write!(
                f,
                "{} depends on itself {}; it will be built in arbitrary order among the other roots",
                self.root,
                describe(self.dependency_profile.as_deref()),
            );
        }

        write!(
            f,
            "Dependency cycle between {root} and {dep}: {root} depends on {dep} {forward}, \
             and {dep} depends on {root}",
            root = self.root,
            dep = self.dependency,
            forward = describe(self.dependency_profile.as_deref()),
        )?;
        if self.back_path.len() > 2 {
            let via: Vec<String> = self.back_path[1..self.back_path.len() - 1]
                .iter()
                .map(ToString::to_string)
                .collect();
            write!(f, " through {}", via.join(" -> "))?;
        }
        write!(f, " {}. ", describe(self.dependent_profile.as_deref()))?;
        match self.resolution {
            CycleResolution::Arbitrary => write!(
                f,
                "Both are roots, so {} and {} will be built in arbitrary order",
                self.root, self.dependency
            ),
            CycleResolution::DependencyFirst => write!(
                f,
                "Ignoring profile dependencies: build {} before {}",
                self.dependency, self.root
            ),
        }
    }
}

fn describe(profile: Option<&str>) -> String {
    match profile {
        Some(profile) => format!("in the `{profile}` profile"),
        None => "unconditionally".to_string(),
    }
}

/// What an edge counts as when subtracting depended-upon projects.
#[derive(PartialEq, Eq, Hash)]
enum Dependee<'a> {
    Project(&'a ProjectId),
    /// A profile edge's target; never equal to any project identity.
    ProfileEdge(&'a str, &'a ProjectId),
}

fn plain(edge: &DependencyEdge) -> Dependee<'_> {
    Dependee::Project(&edge.target)
}

fn qualify(edge: &DependencyEdge) -> Dependee<'_> {
    match &edge.profile {
        Some(profile) => Dependee::ProfileEdge(profile, &edge.target),
        None => Dependee::Project(&edge.target),
    }
}

/// Keys of `map` that no edge, viewed through `view`, points at.
fn find_roots(map: &DependencyMap, view: fn(&DependencyEdge) -> Dependee<'_>) -> BTreeSet<ProjectId> {
    let depended: HashSet<Dependee<'_>> = map.iter().flat_map(|(_, edges)| edges).map(view).collect();
    map.keys()
        .filter(|id| !depended.contains(&Dependee::Project(id)))
        .cloned()
        .collect()
}

/// Pick a root and a dependency leading back to it, preferring the shortest
/// way back (a self-loop, then a direct edge).
fn describe_cycle(map: &DependencyMap, roots: &BTreeSet<ProjectId>) -> Option<CycleWarning> {
    let graph = DependencyGraph::from_map(map);
    let mut best: Option<(&ProjectId, &DependencyEdge, Vec<ProjectId>)> = None;
    for root in roots {
        for edge in map.edges_of(root).into_iter().flatten() {
            let Some(back_path) = graph.path(&edge.target, root) else {
                continue;
            };
            if best.as_ref().map_or(true, |(_, _, p)| back_path.len() < p.len()) {
                best = Some((root, edge, back_path));
            }
        }
    }

    let (root, edge, back_path) = best?;
    let closing = match back_path.len() {
        1 => Some(edge),
        n => map.edge(&back_path[n - 2], root),
    };
    let resolution = if roots.contains(&edge.target) {
        CycleResolution::Arbitrary
    } else {
        CycleResolution::DependencyFirst
    };
    Some(CycleWarning {
        root: root.clone(),
        dependency: edge.target.clone(),
        dependency_profile: edge.profile.clone(),
        dependent_profile: closing.and_then(|e| e.profile.clone()),
        back_path,
        resolution,
    })
}

/// Order every key of `map` so that no project precedes one it depends on.
///
/// Fails with [`MonorailError::CycleDetected`] when a cycle remains after
/// ignoring profile edges.
pub fn topological_sort(map: &DependencyMap) -> MonorailResult<TopologicalOrder> {
    let mut remaining = map.clone();
    let mut layers: Vec<BTreeSet<ProjectId>> = Vec::new();
    let mut warning: Option<CycleWarning> = None;

    while !remaining.is_empty() {
        let mut roots = find_roots(&remaining, plain);
        if roots.is_empty() {
            roots = find_roots(&remaining, qualify);
            if roots.is_empty() {
                let cycles = DependencyGraph::from_map(&remaining).cycles();
                return Err(MonorailError::CycleDetected {
                    cycles,
                    residual: remaining,
                });
            }
            if warning.is_none() {
                warning = describe_cycle(&remaining, &roots);
                if let Some(w) = &warning {
                    tracing::warn!("{w}");
                }
            }
        }

        for root in &roots {
            remaining.remove(root);
        }
        tracing::debug!(
            "peeled {} roots, {} projects left",
            roots.len(),
            remaining.len()
        );
        layers.push(roots);
    }

    Ok(TopologicalOrder {
        order: layers.into_iter().rev().flatten().collect(),
        warning,
    })
}

/// [`topological_sort`] restricted to `keys`, preserving relative order.
pub fn topological_sort_keys(
    map: &DependencyMap,
    keys: &[ProjectId],
) -> MonorailResult<TopologicalOrder> {
    let wanted: HashSet<&ProjectId> = keys.iter().collect();
    let mut sorted = topological_sort(map)?;
    sorted.order.retain(|id| wanted.contains(id));
    Ok(sorted)
}
