//! The recipe descriptor for the Ubitrack facade package.
//!
//! Everything fixed about the package lives here: identity, declared option
//! defaults, upstream libraries and the pinned tool packages.

use semver::Version;

use crate::core::dependency::{Channel, Requirement};
use crate::core::options::OptionSet;

/// Upstream libraries whose `shared` option follows this package's.
pub const UPSTREAM_LIBRARIES: [&str; 3] = ["ubitrack_core", "ubitrack_vision", "ubitrack_dataflow"];

/// Publishing user for `stable` references.
pub const STABLE_USER: &str = "ulricheck";

/// Sources shipped with the exported recipe, relative to the checkout root.
/// Directories are exported recursively.
pub const EXPORTS_SOURCES: [&str; 6] = ["apps", "cmake", "components", "doc", "src", "CMakeLists.txt"];

/// A pinned tool or generator package: `(name, version, user)`, always `stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedTool {
    pub name: &'static str,
    pub version: &'static str,
    pub user: &'static str,
}

impl PinnedTool {
    pub fn requirement(&self) -> Requirement {
        Requirement::new(self.name, self.version, self.user, Channel::Stable)
    }
}

/// Auxiliary generator required by every configuration.
pub const VIRTUALENV_GENERATOR: PinnedTool = PinnedTool {
    name: "ubitrack_virtualenv_generator",
    version: "1.0",
    user: STABLE_USER,
};

/// Java toolchain provisioning, needed for the Java wrapper.
pub const JAVA_INSTALLER: PinnedTool = PinnedTool {
    name: "java_installer",
    version: "9.0.0",
    user: "bincrafters",
};

/// Interface generator for the language wrappers on Windows.
pub const SWIG: PinnedTool = PinnedTool {
    name: "swig",
    version: "3.0.12",
    user: STABLE_USER,
};

/// Static description of the package being built.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: &'static str,
    pub version: Version,
    pub description: &'static str,
    pub url: &'static str,
    pub license: &'static str,
    /// Base name of the produced library artifact.
    pub library: &'static str,
    /// Declared option defaults.
    pub default_options: OptionSet,
}

impl Recipe {
    /// The `ubitrack_facade` recipe.
    pub fn facade() -> Self {
        Recipe {
            name: "ubitrack_facade",
            version: Version::new(1, 3, 0),
            description: "Ubitrack Facade Library and Components",
            url: "https://github.com/Ubitrack/utfacade.git",
            license: "GPL",
            library: "utfacade",
            default_options: OptionSet {
                shared: true,
                workspace_build: false,
                enable_basicfacade: true,
                enable_simplefacade: true,
                enable_dotnet: false,
                enable_java: false,
            },
        }
    }

    /// Replace the declared defaults.
    pub fn with_defaults(mut self, defaults: OptionSet) -> Self {
        self.default_options = defaults;
        self
    }

    /// Version string with separators removed (`1.3.0` -> `130`).
    pub fn version_tag(&self) -> String {
        self.version.to_string().replace('.', "")
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe::facade()
    }
}
