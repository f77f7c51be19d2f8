//! Dependency graph engine for monorepo build ordering: name resolution,
//! graph construction from project declarations, upstream/downstream
//! closures, a profile-tolerant topological sort, and dependency conflict
//! detection across projects.

pub mod builder;
pub mod closure;
pub mod conflict;
pub mod graph;
pub mod names;
pub mod topo;
