//! Package requirements.
//!
//! A [`Requirement`] names another package by reference
//! (`name/version@user/channel`). Upstream libraries are consumed either from
//! the published `stable` channel or from a developer's `local/dev` builds.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Dependency-resolution namespace selecting which build of a package to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "local/dev")]
    LocalDev,
}

impl Channel {
    /// Channel for upstream libraries given the `workspaceBuild` option.
    pub fn for_workspace_build(workspace_build: bool) -> Self {
        if workspace_build {
            Channel::LocalDev
        } else {
            Channel::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::LocalDev => "local/dev",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    /// Publishing user; ignored for [`Channel::LocalDev`], which carries
    /// its own namespace.
    pub user: String,
    pub channel: Channel,
}

impl Requirement {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        user: impl Into<String>,
        channel: Channel,
    ) -> Self {
        Requirement {
            name: name.into(),
            version: version.into(),
            user: user.into(),
            channel,
        }
    }

    /// The package reference string, e.g. `ubitrack_core/1.3.0@ulricheck/stable`.
    pub fn reference(&self) -> String {
        match self.channel {
            Channel::LocalDev => format!("{}/{}@{}", self.name, self.version, self.channel),
            Channel::Stable => format!(
                "{}/{}@{}/{}",
                self.name, self.version, self.user, self.channel
            ),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference())
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reference())
    }
}

/// Ordered list of package requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySpec(Vec<Requirement>);

impl DependencySpec {
    pub fn new() -> Self {
        DependencySpec(Vec::new())
    }

    pub fn push(&mut self, requirement: Requirement) {
        self.0.push(requirement);
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.0.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reference strings in order.
    pub fn references(&self) -> Vec<String> {
        self.0.iter().map(Requirement::reference).collect()
    }
}

impl FromIterator<Requirement> for DependencySpec {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        DependencySpec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DependencySpec {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_for_workspace_build() {
        assert_eq!(Channel::for_workspace_build(true), Channel::LocalDev);
        assert_eq!(Channel::for_workspace_build(false), Channel::Stable);
        assert_eq!(Channel::LocalDev.to_string(), "local/dev");
    }

    #[test]
    fn test_reference_format() {
        let stable = Requirement::new("ubitrack_core", "1.3.0", "ulricheck", Channel::Stable);
        assert_eq!(stable.reference(), "ubitrack_core/1.3.0@ulricheck/stable");

        let dev = Requirement::new("ubitrack_core", "1.3.0", "ulricheck", Channel::LocalDev);
        assert_eq!(dev.reference(), "ubitrack_core/1.3.0@local/dev");
    }

    #[test]
    fn test_spec_serializes_as_references() {
        let spec: DependencySpec = [Requirement::new(
            "swig",
            "3.0.12",
            "ulricheck",
            Channel::Stable,
        )]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"["swig/3.0.12@ulricheck/stable"]"#);
    }
}
