//! Platform facts: the host settings a recipe is resolved against.
//!
//! Spellings follow the package-manager settings model (`Windows`, `Macos`,
//! `Debug`, ...). Parsing rejects anything outside the closed sets; once a
//! [`PlatformFacts`] exists, every downstream step is total.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a platform setting cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("unknown operating system `{0}`")]
    UnknownOs(String),

    #[error("unknown build type `{0}`")]
    UnknownBuildType(String),

    #[error("unknown setting `{0}` (expected one of: os, build_type, compiler, arch)")]
    UnknownSetting(String),

    #[error("malformed setting `{0}` (expected key=value)")]
    Malformed(String),
}

/// Operating systems outside the three first-class platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtherOs {
    FreeBSD,
    SunOS,
    Android,
    Ios,
    WatchOs,
    TvOs,
    Emscripten,
}

impl OtherOs {
    const ALL: [OtherOs; 7] = [
        OtherOs::FreeBSD,
        OtherOs::SunOS,
        OtherOs::Android,
        OtherOs::Ios,
        OtherOs::WatchOs,
        OtherOs::TvOs,
        OtherOs::Emscripten,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OtherOs::FreeBSD => "FreeBSD",
            OtherOs::SunOS => "SunOS",
            OtherOs::Android => "Android",
            OtherOs::Ios => "iOS",
            OtherOs::WatchOs => "watchOS",
            OtherOs::TvOs => "tvOS",
            OtherOs::Emscripten => "Emscripten",
        }
    }
}

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Windows,
    Linux,
    Macos,
    Other(OtherOs),
}

impl Os {
    /// The operating system this binary was compiled for, if it has a
    /// package-manager spelling.
    pub fn host() -> Option<Self> {
        Self::from_target_os(std::env::consts::OS)
    }

    /// Map a Rust `target_os` name onto a settings value.
    ///
    /// Hosts outside the closed set (NetBSD, OpenBSD, Haiku, ...) yield
    /// `None`; the OS must then be given explicitly.
    pub fn from_target_os(target_os: &str) -> Option<Self> {
        let os = match target_os {
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "freebsd" => Os::Other(OtherOs::FreeBSD),
            "solaris" | "illumos" => Os::Other(OtherOs::SunOS),
            "android" => Os::Other(OtherOs::Android),
            "ios" => Os::Other(OtherOs::Ios),
            "watchos" => Os::Other(OtherOs::WatchOs),
            "tvos" => Os::Other(OtherOs::TvOs),
            "emscripten" => Os::Other(OtherOs::Emscripten),
            _ => return None,
        };
        Some(os)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::Other(other) => other.as_str(),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Os::Windows)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Windows" | "windows" => Ok(Os::Windows),
            "Linux" | "linux" => Ok(Os::Linux),
            "Macos" | "macos" | "macOS" => Ok(Os::Macos),
            _ => OtherOs::ALL
                .iter()
                .find(|o| o.as_str().eq_ignore_ascii_case(s))
                .map(|o| Os::Other(*o))
                .ok_or_else(|| PlatformError::UnknownOs(s.to_string())),
        }
    }
}

impl TryFrom<String> for Os {
    type Error = PlatformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Os> for String {
    fn from(os: Os) -> Self {
        os.as_str().to_string()
    }
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(PlatformError::UnknownBuildType(s.to_string())),
        }
    }
}

impl TryFrom<String> for BuildType {
    type Error = PlatformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildType> for String {
    fn from(bt: BuildType) -> Self {
        bt.as_str().to_string()
    }
}

/// Immutable description of the platform being built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    pub os: Os,
    pub build_type: BuildType,
    pub compiler: String,
    pub arch: String,
}

impl PlatformFacts {
    pub fn new(os: Os, build_type: BuildType) -> Self {
        PlatformFacts {
            os,
            build_type,
            compiler: default_compiler(os).to_string(),
            arch: host_arch().to_string(),
        }
    }

    /// Detect the host platform, Release build.
    pub fn host() -> Result<Self, PlatformError> {
        let os = Os::host()
            .ok_or_else(|| PlatformError::UnknownOs(std::env::consts::OS.to_string()))?;
        Ok(PlatformFacts::new(os, BuildType::Release))
    }

    /// Apply a single `key=value` setting, returning the updated facts.
    pub fn with_setting(mut self, setting: &str) -> Result<Self, PlatformError> {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| PlatformError::Malformed(setting.to_string()))?;
        let value = value.trim();

        match key.trim() {
            "os" => self.os = value.parse()?,
            "build_type" => self.build_type = value.parse()?,
            "compiler" => self.compiler = value.to_string(),
            "arch" => self.arch = value.to_string(),
            other => return Err(PlatformError::UnknownSetting(other.to_string())),
        }

        Ok(self)
    }
}

impl fmt::Display for PlatformFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.os, self.arch, self.compiler, self.build_type
        )
    }
}

fn default_compiler(os: Os) -> &'static str {
    match os {
        Os::Windows => "Visual Studio",
        Os::Macos | Os::Other(OtherOs::Ios) => "apple-clang",
        _ => "gcc",
    }
}

fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x86_64",
        "x86" => "x86",
        "aarch64" => "armv8",
        "arm" => "armv7",
        other => other,
    }
}
