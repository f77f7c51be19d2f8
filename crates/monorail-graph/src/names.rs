//! Project name normalization and short-name resolution.

use std::collections::BTreeSet;

use monorail_core::coordinate::SourcedCoordinate;
use monorail_core::errors::{MonorailError, MonorailResult};
use monorail_core::id::ProjectId;
use monorail_core::project::Project;

/// Outcome of resolving a user-supplied name against the known projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ProjectId),
    /// A short name matched several projects.
    Ambiguous(BTreeSet<ProjectId>),
    NotFound,
}

/// Collapse `foo/foo` to `foo`; anything else is returned unchanged.
pub fn condense(id: &ProjectId) -> ProjectId {
    id.condense()
}

/// Resolve `query` against `valid`.
///
/// Exact (or condensed) matches win. A bare short name otherwise matches
/// every project with that artifact; a qualified name never falls back.
pub fn resolve(valid: &BTreeSet<ProjectId>, query: &ProjectId) -> Resolution {
    if valid.contains(query) {
        return Resolution::Found(query.clone());
    }
    let condensed = query.condense();
    if valid.contains(&condensed) {
        return Resolution::Found(condensed);
    }
    if query.is_qualified() {
        return Resolution::NotFound;
    }

    let mut matches: BTreeSet<ProjectId> = valid
        .iter()
        .filter(|id| id.artifact == query.artifact)
        .cloned()
        .collect();
    match matches.len() {
        0 => Resolution::NotFound,
        1 => matches
            .pop_first()
            .map_or(Resolution::NotFound, Resolution::Found),
        _ => Resolution::Ambiguous(matches),
    }
}

/// Like [`resolve`], but turns a miss or an ambiguity into an error.
pub fn resolve_strict(valid: &BTreeSet<ProjectId>, query: &ProjectId) -> MonorailResult<ProjectId> {
    match resolve(valid, query) {
        Resolution::Found(id) => Ok(id),
        Resolution::Ambiguous(candidates) => Err(MonorailError::AmbiguousName {
            name: query.clone(),
            candidates: candidates.into_iter().collect(),
        }),
        Resolution::NotFound => Err(MonorailError::UnresolvedName { name: query.clone() }),
    }
}

/// Strictly resolve several names, keeping query order and dropping repeats.
pub fn resolve_all(
    valid: &BTreeSet<ProjectId>,
    queries: &[ProjectId],
) -> MonorailResult<Vec<ProjectId>> {
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::with_capacity(queries.len());
    for query in queries {
        let id = resolve_strict(valid, query)?;
        if seen.insert(id.clone()) {
            resolved.push(id);
        }
    }
    Ok(resolved)
}

/// The project's unconditional dependencies, names condensed, each tagged
/// with the project as its source.
pub fn sourced_dependencies(project: &Project) -> Vec<SourcedCoordinate> {
    let source = project.id.condense();
    project
        .dependencies
        .iter()
        .map(|coord| SourcedCoordinate::new(coord.condensed(), source.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use monorail_core::coordinate::Coordinate;

    use super::*;

    fn id(s: &str) -> ProjectId {
        ProjectId::parse(s).unwrap()
    }

    #[test]
    fn sourced_dependencies_condense_and_tag() {
        let project = Project::new(id("example/app"))
            .with_dependency(Coordinate::parse("foo/foo:1.0").unwrap())
            .with_profile_dependency("test", Coordinate::parse("midje:1.9").unwrap());

        let sourced = sourced_dependencies(&project);
        assert_eq!(sourced.len(), 1);
        assert_eq!(sourced[0].coordinate.name, id("foo"));
        assert_eq!(sourced[0].source, id("example/app"));
    }

    #[test]
    fn resolve_all_dedups() {
        let valid = BTreeSet::from([id("example/bar"), id("foo")]);
        let queries = [id("bar"), id("foo/foo"), id("example/bar")];
        let resolved = resolve_all(&valid, &queries).unwrap();
        assert_eq!(resolved, vec![id("example/bar"), id("foo")]);
    }

    #[test]
    fn resolve_all_stops_at_first_error() {
        let valid = BTreeSet::from([id("foo")]);
        let err = resolve_all(&valid, &[id("foo"), id("qux")]).unwrap_err();
        assert!(matches!(err, MonorailError::UnresolvedName { .. }));
    }
}
