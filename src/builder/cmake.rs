//! CMake driver: configure, build and install the facade sources.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::context::BuildLayout;
use crate::resolver::Resolution;
use crate::util::fs::ensure_dir;
use crate::util::process::{find_cmake, ProcessBuilder};

/// One CMake invocation in the build sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CMakeStep {
    Configure,
    Build,
    Install,
}

impl fmt::Display for CMakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CMakeStep::Configure => write!(f, "configuration"),
            CMakeStep::Build => write!(f, "build"),
            CMakeStep::Install => write!(f, "install"),
        }
    }
}

/// CMake build adapter.
pub struct CMakeBuilder<'a> {
    resolution: &'a Resolution,
    layout: &'a BuildLayout,
    program: Option<PathBuf>,
    generator: Option<String>,
    jobs: Option<usize>,
    cmake_args: Vec<String>,
}

impl<'a> CMakeBuilder<'a> {
    /// Create a new CMake builder, locating `cmake` on PATH.
    pub fn new(resolution: &'a Resolution, layout: &'a BuildLayout) -> Self {
        CMakeBuilder {
            resolution,
            layout,
            program: find_cmake(),
            generator: None,
            jobs: None,
            cmake_args: Vec::new(),
        }
    }

    /// Use an explicit CMake executable.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Set the CMake generator.
    pub fn generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }

    /// Set the number of parallel build jobs.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Add CMake configure arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cmake_args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    fn cmake(&self) -> &Path {
        self.program.as_deref().unwrap_or_else(|| Path::new("cmake"))
    }

    fn build_type(&self) -> &'static str {
        self.resolution.platform.build_type.as_str()
    }

    /// The configure, build and install commands, in order.
    pub fn plan(&self) -> Vec<(CMakeStep, ProcessBuilder)> {
        vec![
            (CMakeStep::Configure, self.configure_command()),
            (CMakeStep::Build, self.build_command()),
            (CMakeStep::Install, self.install_command()),
        ]
    }

    fn configure_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(self.cmake())
            .arg("-S")
            .arg(&self.layout.source_dir)
            .arg("-B")
            .arg(&self.layout.build_dir);

        if let Some(ref generator) = self.generator {
            cmd = cmd.arg("-G").arg(generator);
        }

        cmd = cmd
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type()))
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                self.layout.install_dir.display()
            ))
            .args(self.resolution.definitions.to_cmake_args());

        cmd.args(&self.cmake_args)
    }

    fn build_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(self.cmake())
            .arg("--build")
            .arg(&self.layout.build_dir)
            .arg("--config")
            .arg(self.build_type())
            .arg("--parallel");

        if let Some(jobs) = self.jobs {
            cmd = cmd.arg(jobs.to_string());
        }

        cmd
    }

    fn install_command(&self) -> ProcessBuilder {
        ProcessBuilder::new(self.cmake())
            .arg("--install")
            .arg(&self.layout.build_dir)
            .arg("--config")
            .arg(self.build_type())
    }

    /// Configure, build and install.
    pub fn build(&self) -> Result<()> {
        if self.program.is_none() {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build the facade library.\n\
                 Install CMake and ensure it's in your PATH, or set CMAKE."
            );
        }

        ensure_dir(&self.layout.build_dir)?;

        for (step, cmd) in self.plan() {
            tracing::info!("Running CMake {}", step);

            cmd.exec_and_check()
                .with_context(|| format!("CMake {} failed", step))?;
        }

        Ok(())
    }
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}
