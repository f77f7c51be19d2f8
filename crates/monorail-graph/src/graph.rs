//! Petgraph view of a [`DependencyMap`], used for traversal and cycle analysis.

use std::collections::{HashMap, VecDeque};

use monorail_core::edge::DependencyMap;
use monorail_core::id::ProjectId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// A dependency map indexed as a directed graph.
///
/// Nodes are every key of the map plus every edge target; edge weights are
/// the profile tag (`None` for unconditional edges).
pub struct DependencyGraph {
    graph: DiGraph<ProjectId, Option<String>>,
    /// Lookup from identifier to node index.
    index: HashMap<ProjectId, NodeIndex>,
}

impl DependencyGraph {
    pub fn from_map(map: &DependencyMap) -> Self {
        let mut g = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        };
        for (id, edges) in map {
            let from = g.add_node(id);
            for edge in edges {
                let to = g.add_node(&edge.target);
                g.graph.add_edge(from, to, edge.profile.clone());
            }
        }
        g
    }

    /// Add or retrieve a node. If the identifier already exists, returns the existing index.
    fn add_node(&mut self, id: &ProjectId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id.clone(), idx);
        idx
    }

    pub fn find(&self, id: &ProjectId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ProjectId {
        &self.graph[idx]
    }

    pub fn inner(&self) -> &DiGraph<ProjectId, Option<String>> {
        &self.graph
    }

    /// A shortest path `from → … → to` following dependency edges.
    ///
    /// `from == to` yields `[from]` without requiring a self-loop.
    pub fn path(&self, from: &ProjectId, to: &ProjectId) -> Option<Vec<ProjectId>> {
        if from == to {
            return Some(vec![from.clone()]);
        }
        let start = self.find(from)?;
        let target = self.find(to)?;

        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::from([(start, start)]);
        while let Some(current) = queue.pop_front() {
            if current == target {
                let mut ids = vec![self.graph[current].clone()];
                let mut cursor = current;
                while cursor != start {
                    cursor = parent[&cursor];
                    ids.push(self.graph[cursor].clone());
                }
                ids.reverse();
                return Some(ids);
            }
            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if !parent.contains_key(&next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Every cycle in the graph as a sorted strongly connected component.
    ///
    /// Self-loops are reported as one-element cycles.
    pub fn cycles(&self) -> Vec<Vec<ProjectId>> {
        let mut cycles: Vec<Vec<ProjectId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&idx| self.graph.contains_edge(idx, idx))
            })
            .map(|component| {
                let mut ids: Vec<ProjectId> =
                    component.into_iter().map(|idx| self.graph[idx].clone()).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }
}
