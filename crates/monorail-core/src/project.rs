use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::id::ProjectId;

/// One subproject of the monorepo, as handed over by the project loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "name")]
    pub id: ProjectId,

    #[serde(default)]
    pub dependencies: Vec<Coordinate>,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// A named bundle of extra dependencies, active only when the profile is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub dependencies: Vec<Coordinate>,
}

impl Project {
    pub fn new(id: ProjectId) -> Self {
        Self {
            id,
            dependencies: Vec::new(),
            profiles: BTreeMap::new(),
        }
    }

    /// Add an unconditional dependency.
    pub fn with_dependency(mut self, coordinate: Coordinate) -> Self {
        self.dependencies.push(coordinate);
        self
    }

    /// Add a dependency that only exists under the named profile.
    pub fn with_profile_dependency(
        mut self,
        profile: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        self.profiles
            .entry(profile.into())
            .or_default()
            .dependencies
            .push(coordinate);
        self
    }
}
