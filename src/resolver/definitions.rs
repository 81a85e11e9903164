//! Projection of resolved options into CMake cache variables.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::core::options::{OptionName, OptionSet};

/// CMake variable name for each projected option, in emission order.
pub const DEFINITION_KEYS: [(&str, OptionName); 5] = [
    ("BUILD_SHARED_LIBS", OptionName::Shared),
    ("ENABLE_BASICFACADE", OptionName::EnableBasicFacade),
    ("ENABLE_SIMPLEFACADE", OptionName::EnableSimpleFacade),
    ("ENABLE_DOTNET_WRAPPER", OptionName::EnableDotnet),
    ("ENABLE_JAVA_WRAPPER", OptionName::EnableJava),
];

/// Ordered boolean CMake definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definitions(Vec<(&'static str, bool)>);

impl Definitions {
    /// Project the effective options verbatim onto the definition keys.
    pub fn project(options: &OptionSet) -> Self {
        Definitions(
            DEFINITION_KEYS
                .iter()
                .map(|(key, option)| (*key, options.get(*option)))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `-DKEY=ON|OFF` arguments for a CMake configure step.
    pub fn to_cmake_args(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("-D{}={}", key, if value { "ON" } else { "OFF" }))
            .collect()
    }
}

impl fmt::Display for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cmake_args().join(" "))
    }
}

impl Serialize for Definitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
