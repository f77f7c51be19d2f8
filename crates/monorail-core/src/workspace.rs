use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::errors::{MonorailError, MonorailResult};
use crate::id::ProjectId;
use crate::project::Project;

/// A monorepo: every subproject, keyed by its condensed identifier.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub projects: BTreeMap<ProjectId, Project>,
}

#[derive(Deserialize)]
struct RawWorkspace {
    #[serde(default)]
    project: Vec<Project>,
}

impl Workspace {
    /// Build a workspace from loaded projects.
    ///
    /// Identifiers are condensed; two projects condensing to the same
    /// identifier are rejected.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> MonorailResult<Self> {
        let mut map = BTreeMap::new();
        for mut project in projects {
            project.id = project.id.condense();
            if map.contains_key(&project.id) {
                return Err(MonorailError::Manifest {
                    message: format!("duplicate project `{}`", project.id),
                });
            }
            map.insert(project.id.clone(), project);
        }
        tracing::debug!("loaded {} projects", map.len());
        Ok(Self { projects: map })
    }

    /// Parse a workspace description from a TOML string.
    pub fn parse_toml(content: &str) -> MonorailResult<Self> {
        let raw: RawWorkspace = toml::from_str(content).map_err(|e| MonorailError::Manifest {
            message: e.to_string(),
        })?;
        Self::from_projects(raw.project)
    }

    /// The set of valid project names, for name resolution.
    pub fn project_names(&self) -> BTreeSet<ProjectId> {
        self.projects.keys().cloned().collect()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
