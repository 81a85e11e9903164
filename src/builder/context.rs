//! Build layout - where sources live and where output goes.

use std::path::{Path, PathBuf};

/// Directories used by a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Source checkout containing `CMakeLists.txt`
    pub source_dir: PathBuf,

    /// CMake binary directory
    pub build_dir: PathBuf,

    /// Install prefix the package is assembled into
    pub install_dir: PathBuf,
}

impl BuildLayout {
    /// Default layout: `<source>/build` and `<source>/build/package`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let build_dir = source_dir.join("build");
        let install_dir = build_dir.join("package");
        BuildLayout {
            source_dir,
            build_dir,
            install_dir,
        }
    }

    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    /// Directory runtime libraries are imported into.
    pub fn import_root(&self) -> &Path {
        &self.build_dir
    }
}
