//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.facade-recipe/config.toml` - User-wide defaults
//! - Project: `.facade-recipe/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config; command-line
//! settings and options take precedence over both.
//!
//! ```toml
//! [settings]
//! os = "Windows"
//! build_type = "Debug"
//!
//! [options]
//! enable_java = true
//!
//! [upstream]
//! ubitrack_core = true
//!
//! [cmake]
//! generator = "Ninja"
//! jobs = 8
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::{OptionOverlay, UpstreamOptions};
use crate::core::platform::{BuildType, Os, PlatformFacts};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".facade-recipe";

/// Environment variable overriding the global configuration directory.
pub const CONFIG_HOME_ENV: &str = "FACADE_RECIPE_HOME";

/// Recipe configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform settings
    pub settings: SettingsConfig,

    /// Option overlay applied before command-line options
    pub options: OptionOverlay,

    /// `shared` values of upstream libraries
    pub upstream: UpstreamOptions,

    /// CMake invocation settings
    pub cmake: CMakeConfig,
}

/// Platform settings; unset fields keep the detected host value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub os: Option<Os>,
    pub build_type: Option<BuildType>,
    pub compiler: Option<String>,
    pub arch: Option<String>,
}

/// CMake invocation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CMakeConfig {
    /// Generator passed with `-G` (e.g., "Ninja")
    pub generator: Option<String>,

    /// Number of parallel build jobs
    pub jobs: Option<usize>,

    /// Extra arguments for the configure step
    pub extra_args: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults only if the file is missing.
    ///
    /// A file that exists but fails to parse is an error: an unknown OS or
    /// build type must not silently turn into the host platform.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.settings.os.is_some() {
            self.settings.os = other.settings.os;
        }
        if other.settings.build_type.is_some() {
            self.settings.build_type = other.settings.build_type;
        }
        if other.settings.compiler.is_some() {
            self.settings.compiler = other.settings.compiler;
        }
        if other.settings.arch.is_some() {
            self.settings.arch = other.settings.arch;
        }

        self.options.merge(&other.options);
        self.upstream.merge(&other.upstream);

        if other.cmake.generator.is_some() {
            self.cmake.generator = other.cmake.generator;
        }
        if other.cmake.jobs.is_some() {
            self.cmake.jobs = other.cmake.jobs;
        }
        if !other.cmake.extra_args.is_empty() {
            self.cmake.extra_args = other.cmake.extra_args;
        }
    }

    /// Apply the configured settings on top of `base`.
    pub fn platform(&self, base: PlatformFacts) -> PlatformFacts {
        let mut facts = match self.settings.os {
            // Re-derive the default compiler for the configured OS.
            Some(os) if os != base.os => PlatformFacts {
                arch: base.arch,
                ..PlatformFacts::new(os, base.build_type)
            },
            _ => base,
        };

        if let Some(build_type) = self.settings.build_type {
            facts.build_type = build_type;
        }
        if let Some(ref compiler) = self.settings.compiler {
            facts.compiler = compiler.clone();
        }
        if let Some(ref arch) = self.settings.arch {
            facts.arch = arch.clone();
        }
        facts
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.facade-recipe/config.toml)
/// 2. Global config (~/.facade-recipe/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path)?);
    }

    config.merge(Config::load_or_default(project_path)?);

    Ok(config)
}

/// Get the global config directory (`$FACADE_RECIPE_HOME` or `~/.facade-recipe`).
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(home));
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`.facade-recipe/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}
