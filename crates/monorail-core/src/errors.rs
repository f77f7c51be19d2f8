use miette::Diagnostic;
use thiserror::Error;

use crate::edge::DependencyMap;
use crate::id::ProjectId;

/// Unified error type for all Monorail operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MonorailError {
    /// Invalid or malformed workspace description.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the workspace description for syntax errors"))]
    Manifest { message: String },

    /// A short or qualified name matched no project.
    #[error("Could not resolve `{name}` to any project in the repository")]
    #[diagnostic(help("Use the full `group/artifact` form or check the spelling"))]
    UnresolvedName { name: ProjectId },

    /// A short name matched more than one project.
    #[error("Name `{name}` is ambiguous; it could refer to: {}", join(.candidates))]
    #[diagnostic(help("Use the full `group/artifact` form to pick one"))]
    AmbiguousName {
        name: ProjectId,
        candidates: Vec<ProjectId>,
    },

    /// The build order cannot be computed because of a cycle that no
    /// profile-only edge explains.
    #[error("Dependency cycle detected among: {}", join_cycles(.cycles))]
    #[diagnostic(help("Break the cycle or move one of its edges into a profile such as `test`"))]
    CycleDetected {
        /// Strongly connected components of the residual map, each sorted.
        cycles: Vec<Vec<ProjectId>>,
        /// The part of the dependency map that could not be ordered.
        residual: DependencyMap,
    },
}

/// Convenience alias for results carrying a [`MonorailError`].
pub type MonorailResult<T> = Result<T, MonorailError>;

fn join(ids: &[ProjectId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_cycles(cycles: &[Vec<ProjectId>]) -> String {
    cycles
        .iter()
        .map(|cycle| format!("[{}]", join(cycle)))
        .collect::<Vec<_>>()
        .join(" ")
}
