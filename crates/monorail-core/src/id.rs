use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::MonorailError;

/// A project identifier: `group/artifact`, or the bare `artifact` short form.
///
/// Ordering compares the group first (short names sort before qualified
/// ones), then the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId {
    pub group: Option<String>,
    pub artifact: String,
}

impl ProjectId {
    /// A qualified identifier. Not condensed; see [`ProjectId::condense`].
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            artifact: artifact.into(),
        }
    }

    /// A bare short name with no group part.
    pub fn short(artifact: impl Into<String>) -> Self {
        Self {
            group: None,
            artifact: artifact.into(),
        }
    }

    /// Parse `"group/artifact"` or `"artifact"`.
    ///
    /// Returns `None` for empty parts or more than one `/`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.split_once('/') {
            None if !s.is_empty() => Some(Self::short(s)),
            Some((group, artifact))
                if !group.is_empty() && !artifact.is_empty() && !artifact.contains('/') =>
            {
                Some(Self::new(group, artifact))
            }
            _ => None,
        }
    }

    /// Collapse to the short form when the group equals the artifact.
    pub fn condense(&self) -> Self {
        match &self.group {
            Some(group) if *group == self.artifact => Self::short(self.artifact.clone()),
            _ => self.clone(),
        }
    }

    /// Returns `true` if this identifier carries a group part.
    pub fn is_qualified(&self) -> bool {
        self.group.is_some()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{}/{}", group, self.artifact),
            None => f.write_str(&self.artifact),
        }
    }
}

impl FromStr for ProjectId {
    type Err = MonorailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MonorailError::Manifest {
            message: format!("invalid project name `{s}`"),
        })
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
