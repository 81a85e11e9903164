//! Recipe options.
//!
//! The option schema is closed: [`OptionName`] enumerates every option the
//! recipe declares. [`OptionSet`] is a total assignment (every option has a
//! value), [`OptionOverlay`] is the partial assignment a caller supplies.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised while parsing option input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid value `{value}` for option `{name}` (expected True or False)")]
    InvalidValue { name: String, value: String },

    #[error("malformed option `{0}` (expected name=value)")]
    Malformed(String),
}

/// A declared recipe option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionName {
    Shared,
    WorkspaceBuild,
    EnableBasicFacade,
    EnableSimpleFacade,
    EnableDotnet,
    EnableJava,
}

impl OptionName {
    /// Every option, in declaration order.
    pub const ALL: [OptionName; 6] = [
        OptionName::Shared,
        OptionName::WorkspaceBuild,
        OptionName::EnableBasicFacade,
        OptionName::EnableSimpleFacade,
        OptionName::EnableDotnet,
        OptionName::EnableJava,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Shared => "shared",
            OptionName::WorkspaceBuild => "workspaceBuild",
            OptionName::EnableBasicFacade => "enable_basicfacade",
            OptionName::EnableSimpleFacade => "enable_simplefacade",
            OptionName::EnableDotnet => "enable_dotnet",
            OptionName::EnableJava => "enable_java",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionName {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| OptionError::UnknownOption(s.to_string()))
    }
}

impl TryFrom<String> for OptionName {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionName> for String {
    fn from(name: OptionName) -> Self {
        name.as_str().to_string()
    }
}

/// Parse a boolean option value in any of the spellings package managers
/// and CMake use.
pub fn parse_bool(name: &str, value: &str) -> Result<bool, OptionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(OptionError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// A value for every declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub shared: bool,
    #[serde(rename = "workspaceBuild")]
    pub workspace_build: bool,
    pub enable_basicfacade: bool,
    pub enable_simplefacade: bool,
    pub enable_dotnet: bool,
    pub enable_java: bool,
}

impl OptionSet {
    pub fn get(&self, name: OptionName) -> bool {
        match name {
            OptionName::Shared => self.shared,
            OptionName::WorkspaceBuild => self.workspace_build,
            OptionName::EnableBasicFacade => self.enable_basicfacade,
            OptionName::EnableSimpleFacade => self.enable_simplefacade,
            OptionName::EnableDotnet => self.enable_dotnet,
            OptionName::EnableJava => self.enable_java,
        }
    }

    pub fn set(&mut self, name: OptionName, value: bool) {
        let slot = match name {
            OptionName::Shared => &mut self.shared,
            OptionName::WorkspaceBuild => &mut self.workspace_build,
            OptionName::EnableBasicFacade => &mut self.enable_basicfacade,
            OptionName::EnableSimpleFacade => &mut self.enable_simplefacade,
            OptionName::EnableDotnet => &mut self.enable_dotnet,
            OptionName::EnableJava => &mut self.enable_java,
        };
        *slot = value;
    }

    /// Return a copy with the overlay's explicit values applied.
    pub fn overlaid(mut self, overlay: &OptionOverlay) -> Self {
        for (name, value) in overlay.iter() {
            self.set(name, value);
        }
        self
    }

    /// Iterate `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        OptionName::ALL.into_iter().map(|name| (name, self.get(name)))
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{}={}", name, if value { "True" } else { "False" }))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Caller-supplied partial option values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionOverlay(BTreeMap<OptionName, bool>);

impl OptionOverlay {
    pub fn new() -> Self {
        OptionOverlay(BTreeMap::new())
    }

    pub fn with(mut self, name: OptionName, value: bool) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: OptionName, value: bool) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: OptionName) -> Option<bool> {
        self.0.get(&name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }

    /// Merge another overlay into this one (other takes precedence).
    pub fn merge(&mut self, other: &OptionOverlay) {
        for (name, value) in other.iter() {
            self.0.insert(name, value);
        }
    }

    /// Parse `name=value` assignments, later entries winning.
    pub fn parse_assignments<I, S>(assignments: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overlay = OptionOverlay::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| OptionError::Malformed(assignment.to_string()))?;
            let name = name.trim();
            let option: OptionName = name.parse()?;
            overlay.insert(option, parse_bool(name, value)?);
        }
        Ok(overlay)
    }
}

/// The `shared` option of each upstream dependency, where one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamOptions(BTreeMap<String, bool>);

impl UpstreamOptions {
    pub fn new() -> Self {
        UpstreamOptions(BTreeMap::new())
    }

    pub fn with_shared(mut self, package: impl Into<String>, shared: bool) -> Self {
        self.set_shared(package, shared);
        self
    }

    pub fn set_shared(&mut self, package: impl Into<String>, shared: bool) {
        self.0.insert(package.into(), shared);
    }

    pub fn shared(&self, package: &str) -> Option<bool> {
        self.0.get(package).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0.iter().map(|(name, shared)| (name.as_str(), *shared))
    }

    /// Merge another set of upstream options into this one (other takes precedence).
    pub fn merge(&mut self, other: &UpstreamOptions) {
        for (name, shared) in other.iter() {
            self.0.insert(name.to_string(), shared);
        }
    }

    /// Parse `package=value` assignments.
    pub fn parse_assignments<I, S>(assignments: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut upstream = UpstreamOptions::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (package, value) = assignment
                .split_once('=')
                .ok_or_else(|| OptionError::Malformed(assignment.to_string()))?;
            let package = package.trim();
            let package = package.strip_suffix(":shared").unwrap_or(package);
            upstream.set_shared(package, parse_bool(package, value)?);
        }
        Ok(upstream)
    }
}
