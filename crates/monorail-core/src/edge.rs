//! Dependency edges and the per-project dependency map.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::id::ProjectId;

/// A `consumer → target` edge.
///
/// Only `target` takes part in equality, hashing and ordering; the profile
/// tag and source are metadata riding along with the edge.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyEdge {
    pub target: ProjectId,
    /// Profile the edge exists under; `None` for unconditional edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Project that declared the edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ProjectId>,
}

impl DependencyEdge {
    /// An unconditional edge to `target`.
    pub fn new(target: ProjectId) -> Self {
        Self {
            target,
            profile: None,
            source: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_source(mut self, source: ProjectId) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns `true` if the edge only exists under a named profile.
    pub fn is_profile_only(&self) -> bool {
        self.profile.is_some()
    }
}

impl PartialEq for DependencyEdge {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for DependencyEdge {}

impl Hash for DependencyEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
    }
}

impl PartialOrd for DependencyEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.target.cmp(&other.target)
    }
}

impl Borrow<ProjectId> for DependencyEdge {
    fn borrow(&self) -> &ProjectId {
        &self.target
    }
}

/// Mapping from each project to the set of edges it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: BTreeMap<ProjectId, BTreeSet<DependencyEdge>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edges of `id`, replacing any previous entry.
    pub fn insert(&mut self, id: ProjectId, edges: BTreeSet<DependencyEdge>) {
        self.entries.insert(id, edges);
    }

    pub fn remove(&mut self, id: &ProjectId) -> Option<BTreeSet<DependencyEdge>> {
        self.entries.remove(id)
    }

    /// Edges leaving `id`, if `id` is a key of the map.
    pub fn edges_of(&self, id: &ProjectId) -> Option<&BTreeSet<DependencyEdge>> {
        self.entries.get(id)
    }

    /// The edge `from → to`, if present.
    pub fn edge(&self, from: &ProjectId, to: &ProjectId) -> Option<&DependencyEdge> {
        self.entries.get(from)?.get(to)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ProjectId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ProjectId, BTreeSet<DependencyEdge>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ProjectId, BTreeSet<DependencyEdge>)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (ProjectId, BTreeSet<DependencyEdge>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DependencyMap {
    type Item = (&'a ProjectId, &'a BTreeSet<DependencyEdge>);
    type IntoIter = btree_map::Iter<'a, ProjectId, BTreeSet<DependencyEdge>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
