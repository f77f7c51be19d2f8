//! Dependency map construction from project declarations.

use std::collections::{BTreeMap, BTreeSet};

use monorail_core::edge::{DependencyEdge, DependencyMap};
use monorail_core::id::ProjectId;
use monorail_core::project::Project;

/// Collect the edges leaving `project`.
///
/// Unconditional dependencies come first, so a target also named under a
/// profile keeps its untagged edge. Among profiles, the lexically first
/// profile naming a target provides its tag.
pub fn collect_dependencies(project: &Project) -> BTreeSet<DependencyEdge> {
    let source = project.id.condense();
    let mut edges = BTreeSet::new();

    for coord in &project.dependencies {
        edges.insert(DependencyEdge::new(coord.name.condense()).with_source(source.clone()));
    }
    for (profile, def) in &project.profiles {
        for coord in &def.dependencies {
            // `insert` keeps the existing edge when the target is already present.
            edges.insert(
                DependencyEdge::new(coord.name.condense())
                    .with_profile(profile.clone())
                    .with_source(source.clone()),
            );
        }
    }
    edges
}

/// Build the dependency map for a set of projects.
///
/// Keys are used as given; short-name resolution is the caller's job.
pub fn dependency_map(projects: &BTreeMap<ProjectId, Project>) -> DependencyMap {
    projects
        .iter()
        .map(|(id, project)| {
            let edges = collect_dependencies(project);
            tracing::debug!(
                "{id}: {} dependencies ({} profile-only)",
                edges.len(),
                edges.iter().filter(|e| e.is_profile_only()).count()
            );
            (id.clone(), edges)
        })
        .collect()
}
