use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MonorailError;
use crate::id::ProjectId;

/// Attribute key holding the build phase a dependency applies to.
pub const SCOPE: &str = "scope";

/// A dependency coordinate: name, version and free-form attributes.
///
/// Deserializes from the shorthand (`"group/artifact:version[:scope]"`) or a
/// table with attributes inline next to `name` and `version`; serializes to
/// the table form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub name: ProjectId,
    pub version: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl Coordinate {
    pub fn new(name: ProjectId, version: impl Into<String>) -> Self {
        Self {
            name,
            version: version.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Parse `"name:version"` or `"name:version:scope"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let (name, version, scope) = match parts.as_slice() {
            [name, version] => (name, version, None),
            [name, version, scope] if !scope.is_empty() => (name, version, Some(*scope)),
            _ => return None,
        };
        if version.is_empty() {
            return None;
        }
        let coord = Self::new(ProjectId::parse(name)?, *version);
        Some(match scope {
            Some(scope) => coord.with_scope(scope),
            None => coord,
        })
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_scope(self, scope: impl Into<String>) -> Self {
        self.with_attribute(SCOPE, scope)
    }

    pub fn scope(&self) -> Option<&str> {
        self.attributes.get(SCOPE).map(String::as_str)
    }

    /// The same coordinate with its `scope` attribute removed.
    pub fn without_scope(&self) -> Self {
        let mut stripped = self.clone();
        stripped.attributes.remove(SCOPE);
        stripped
    }

    /// The same coordinate with its name condensed.
    pub fn condensed(&self) -> Self {
        Self {
            name: self.name.condense(),
            ..self.clone()
        }
    }
}

/// `name:version[:scope]`, followed by any other attributes as ` key=value`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)?;
        if let Some(scope) = self.scope() {
            write!(f, ":{scope}")?;
        }
        for (key, value) in self.attributes.iter().filter(|(key, _)| *key != SCOPE) {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// A coordinate annotated with the project that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcedCoordinate {
    pub coordinate: Coordinate,
    pub source: ProjectId,
}

impl SourcedCoordinate {
    pub fn new(coordinate: Coordinate, source: ProjectId) -> Self {
        Self { coordinate, source }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Short(String),
    Detailed {
        name: ProjectId,
        version: String,
        #[serde(flatten)]
        attributes: BTreeMap<String, String>,
    },
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MonorailError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        match raw {
            RawCoordinate::Short(s) => Self::parse(&s).ok_or_else(|| MonorailError::Manifest {
                message: format!("invalid dependency coordinate `{s}`"),
            }),
            RawCoordinate::Detailed {
                name,
                version,
                attributes,
            } => Ok(Self {
                name,
                version,
                attributes,
            }),
        }
    }
}
