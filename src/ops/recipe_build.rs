//! Implementation of `facade-recipe build`.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::cmake::is_cmake_project;
use crate::builder::{import_runtime_libs, BuildLayout, CMakeBuilder};
use crate::core::recipe::Recipe;
use crate::ops::resolve::{resolve_recipe, ResolveOptions};
use crate::resolver::Resolution;
use crate::util::config::Config;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Settings, options and upstream overrides
    pub resolve: ResolveOptions,

    /// Source checkout
    pub source_dir: PathBuf,

    /// CMake binary directory (defaults to `<source>/build`)
    pub build_dir: Option<PathBuf>,

    /// Install prefix (defaults to `<build>/package`)
    pub install_dir: Option<PathBuf>,

    /// Installed upstream package directories to import runtime libraries from
    pub deps: Vec<PathBuf>,

    /// Number of parallel jobs (overrides config)
    pub jobs: Option<usize>,

    /// Print the planned commands instead of running them
    pub dry_run: bool,
}

/// What a build did (or would do, for a dry run).
#[derive(Debug)]
pub struct BuildReport {
    pub resolution: Resolution,
    pub layout: BuildLayout,
    pub imported: Vec<PathBuf>,
    pub commands: Vec<String>,
    pub executed: bool,
}

/// Resolve, import runtime libraries and run CMake.
pub fn build(recipe: &Recipe, config: &Config, opts: &BuildOptions) -> Result<BuildReport> {
    if !is_cmake_project(&opts.source_dir) {
        bail!(
            "no CMakeLists.txt in {}\n\
             help: pass the facade checkout with --source-dir",
            opts.source_dir.display()
        );
    }

    let resolution = resolve_recipe(recipe, config, &opts.resolve)?;

    let mut layout = BuildLayout::new(&opts.source_dir);
    if let Some(ref dir) = opts.build_dir {
        layout = layout.with_build_dir(dir);
        if opts.install_dir.is_none() {
            layout = layout.with_install_dir(dir.join("package"));
        }
    }
    if let Some(ref dir) = opts.install_dir {
        layout = layout.with_install_dir(dir);
    }

    let builder = CMakeBuilder::new(&resolution, &layout)
        .generator(config.cmake.generator.clone())
        .jobs(opts.jobs.or(config.cmake.jobs))
        .args(config.cmake.extra_args.iter().cloned());

    let commands: Vec<String> = builder
        .plan()
        .iter()
        .map(|(_, cmd)| cmd.display_command())
        .collect();

    if opts.dry_run {
        return Ok(BuildReport {
            resolution,
            layout,
            imported: Vec::new(),
            commands,
            executed: false,
        });
    }

    let imported = import_runtime_libs(&opts.deps, layout.import_root())?;
    if !imported.is_empty() {
        tracing::info!("Imported {} runtime libraries", imported.len());
    }

    builder.build()?;
    tracing::info!(
        "Built {} into {}",
        resolution.library(),
        layout.install_dir.display()
    );

    Ok(BuildReport {
        resolution,
        layout,
        imported,
        commands,
        executed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_requires_cmake_project() {
        let tmp = TempDir::new().unwrap();
        let opts = BuildOptions {
            source_dir: tmp.path().to_path_buf(),
            dry_run: true,
            ..BuildOptions::default()
        };

        let err = build(&Recipe::facade(), &Config::default(), &opts).unwrap_err();
        assert!(err.to_string().contains("no CMakeLists.txt"));
    }

    #[test]
    fn test_dry_run_plans_without_executing() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("CMakeLists.txt"), "project(utfacade)").unwrap();
        let build_dir = tmp.path().join("out");

        let mut config = Config::default();
        config.cmake.jobs = Some(3);

        let opts = BuildOptions {
            resolve: ResolveOptions {
                settings: vec!["os=Linux".into(), "build_type=Release".into()],
                options: vec!["shared=False".into()],
                upstream: Vec::new(),
            },
            source_dir: tmp.path().to_path_buf(),
            build_dir: Some(build_dir.clone()),
            dry_run: true,
            ..BuildOptions::default()
        };

        let report = build(&Recipe::facade(), &config, &opts).unwrap();
        assert!(!report.executed);
        assert!(!build_dir.exists());
        assert_eq!(report.layout.install_dir, build_dir.join("package"));
        assert_eq!(report.commands.len(), 3);
        assert!(report.commands[0].contains("-DBUILD_SHARED_LIBS=OFF"));
        assert!(report.commands[1].ends_with("--parallel 3"));
    }
}
