//! Dependency conflict detection across the projects of a monorepo.
//!
//! Projects are free to declare the same external dependency at different
//! coordinates. Merging them picks the first declaration and reports every
//! disagreement; nothing here fails.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use monorail_core::coordinate::{Coordinate, SourcedCoordinate};
use monorail_core::id::ProjectId;
use monorail_core::project::Project;
use serde::Serialize;

use crate::names::sourced_dependencies;

/// A report of all dependency conflicts encountered while merging.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<DependencyConflict>,
}

/// One dependency declared at more than one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyConflict {
    pub name: ProjectId,
    /// Number of distinct projects declaring the dependency.
    pub project_count: usize,
    /// Every distinct spec (scope removed), in first-seen order.
    pub specs: Vec<ConflictingSpec>,
    pub selected: Coordinate,
}

/// A distinct spec and the projects declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictingSpec {
    pub coordinate: Coordinate,
    pub projects: Vec<ProjectId>,
}

/// The coordinate chosen for one dependency and the conflict, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub coordinate: Coordinate,
    pub conflict: Option<DependencyConflict>,
}

/// Every selected coordinate of a monorepo plus the conflicts behind them.
#[derive(Debug, Clone, Default)]
pub struct MergedDependencies {
    pub coordinates: Vec<Coordinate>,
    pub conflicts: ConflictReport,
}

/// Counts over a [`ConflictReport`], for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    pub conflicts: usize,
    /// Conflicting dependency names, in report order.
    pub dependencies: Vec<ProjectId>,
    /// Every project declaring one of the conflicting specs.
    pub projects: BTreeSet<ProjectId>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// The conflict recorded for dependency `name`, if any.
    pub fn get(&self, name: &ProjectId) -> Option<&DependencyConflict> {
        self.conflicts.iter().find(|c| &c.name == name)
    }

    pub fn affected_projects(&self) -> BTreeSet<ProjectId> {
        self.conflicts
            .iter()
            .flat_map(|c| &c.specs)
            .flat_map(|spec| spec.projects.iter().cloned())
            .collect()
    }

    pub fn summary(&self) -> ConflictSummary {
        ConflictSummary {
            conflicts: self.len(),
            dependencies: self.conflicts.iter().map(|c| c.name.clone()).collect(),
            projects: self.affected_projects(),
        }
    }
}

impl FromIterator<DependencyConflict> for ConflictReport {
    fn from_iter<I: IntoIterator<Item = DependencyConflict>>(iter: I) -> Self {
        Self {
            conflicts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "All projects agree on their dependencies.");
        }
        writeln!(
            f,
            "{} conflicting dependencies across {} projects:",
            self.len(),
            self.affected_projects().len()
        )?;
        for c in &self.conflicts {
            writeln!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DependencyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Multiple dependency specs found for {} in {} projects - using {}",
            self.name, self.project_count, self.selected
        )?;
        for spec in &self.specs {
            let projects: Vec<String> = spec.projects.iter().map(ToString::to_string).collect();
            write!(
                f,
                "\n  {:<50} from {}",
                spec.coordinate.to_string(),
                projects.join(" ")
            )?;
        }
        Ok(())
    }
}

/// Choose the coordinate for dependency `name` among `specs`.
///
/// Specs are compared with their scope removed. The first spec always wins;
/// a conflict is attached when the stripped specs disagree. Returns `None`
/// only when `specs` is empty.
pub fn select_dependency(name: &ProjectId, specs: &[SourcedCoordinate]) -> Option<Selection> {
    let first = specs.first()?;

    let mut distinct: Vec<(Coordinate, BTreeSet<ProjectId>)> = Vec::new();
    for spec in specs {
        let stripped = spec.coordinate.without_scope();
        match distinct.iter_mut().find(|(coord, _)| *coord == stripped) {
            Some((_, projects)) => {
                projects.insert(spec.source.clone());
            }
            None => distinct.push((stripped, BTreeSet::from([spec.source.clone()]))),
        }
    }

    let conflict = (distinct.len() > 1).then(|| {
        let project_count = specs
            .iter()
            .map(|spec| &spec.source)
            .collect::<BTreeSet<_>>()
            .len();
        let conflict = DependencyConflict {
            name: name.clone(),
            project_count,
            specs: distinct
                .into_iter()
                .map(|(coordinate, projects)| ConflictingSpec {
                    coordinate,
                    projects: projects.into_iter().collect(),
                })
                .collect(),
            selected: first.coordinate.clone(),
        };
        tracing::warn!("{conflict}");
        conflict
    });

    Some(Selection {
        coordinate: first.coordinate.clone(),
        conflict,
    })
}

/// Merge the unconditional dependencies of every project.
///
/// Dependencies are grouped by condensed name in first-seen order, walking
/// projects in key order, and each group goes through [`select_dependency`].
pub fn merge_dependencies(projects: &BTreeMap<ProjectId, Project>) -> MergedDependencies {
    let mut groups: Vec<(ProjectId, Vec<SourcedCoordinate>)> = Vec::new();
    let mut index: HashMap<ProjectId, usize> = HashMap::new();
    for project in projects.values() {
        for sourced in sourced_dependencies(project) {
            let name = sourced.coordinate.name.clone();
            match index.get(&name) {
                Some(&i) => groups[i].1.push(sourced),
                None => {
                    index.insert(name.clone(), groups.len());
                    groups.push((name, vec![sourced]));
                }
            }
        }
    }

    let mut coordinates = Vec::with_capacity(groups.len());
    let mut conflicts = Vec::new();
    for (name, specs) in &groups {
        if let Some(selection) = select_dependency(name, specs) {
            coordinates.push(selection.coordinate);
            conflicts.extend(selection.conflict);
        }
    }
    let merged = MergedDependencies {
        coordinates,
        conflicts: conflicts.into_iter().collect(),
    };
    tracing::debug!(
        "merged {} dependencies, {} conflicts",
        merged.coordinates.len(),
        merged.conflicts.len()
    );
    merged
}
