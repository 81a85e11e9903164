//! Package metadata consumed by downstream packages.

use serde::Serialize;

use crate::core::dependency::DependencySpec;
use crate::core::options::OptionSet;
use crate::core::platform::{BuildType, PlatformFacts};
use crate::core::recipe::Recipe;

/// Name of the library artifact downstream consumers link against.
///
/// Windows builds carry the version tag and, for Debug, a trailing `d`
/// (`utfacade130d`); every other platform uses the bare name.
pub fn library_label(recipe: &Recipe, platform: &PlatformFacts) -> String {
    let mut label = recipe.library.to_string();
    if platform.os.is_windows() {
        label.push_str(&recipe.version_tag());
        if platform.build_type == BuildType::Debug {
            label.push('d');
        }
    }
    label
}

/// Everything a consumer needs to locate and link the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub url: String,
    pub license: String,
    pub libs: Vec<String>,
    pub requires: DependencySpec,
    pub options: OptionSet,
}

impl PackageInfo {
    pub fn new(
        recipe: &Recipe,
        platform: &PlatformFacts,
        requires: DependencySpec,
        options: OptionSet,
    ) -> Self {
        PackageInfo {
            name: recipe.name.to_string(),
            version: recipe.version.to_string(),
            description: recipe.description.to_string(),
            url: recipe.url.to_string(),
            license: recipe.license.to_string(),
            libs: vec![library_label(recipe, platform)],
            requires,
            options,
        }
    }

    /// The primary library label.
    pub fn library(&self) -> &str {
        self.libs.first().map(String::as_str).unwrap_or_default()
    }
}
