//! Core data types for the Monorail build-ordering engine.
//!
//! This crate defines the fundamental types that describe a monorepo to the
//! graph engine: project identifiers, dependency coordinates, projects and
//! their profiles, dependency edges and maps, the TOML workspace
//! description, and the unified error type.
//!
//! This crate is intentionally free of algorithms and I/O.

pub mod coordinate;
pub mod edge;
pub mod errors;
pub mod id;
pub mod project;
pub mod workspace;

pub use coordinate::{Coordinate, SourcedCoordinate};
pub use edge::{DependencyEdge, DependencyMap};
pub use errors::{MonorailError, MonorailResult};
pub use id::ProjectId;
pub use project::{Profile, Project};
pub use workspace::Workspace;
