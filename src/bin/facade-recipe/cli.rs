//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use facade_recipe::ops::ResolveOptions;

/// facade-recipe - build recipe for the Ubitrack facade library
#[derive(Parser)]
#[command(name = "facade-recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve options, requirements and CMake definitions
    Resolve(ResolveArgs),

    /// Import runtime libraries and run the CMake build
    Build(BuildArgs),

    /// Copy the exported source set out of a checkout
    Export(ExportArgs),

    /// Print the package info consumed by downstream packages
    Info(InfoArgs),
}

/// Inputs shared by every command that resolves the recipe.
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Platform setting (os, build_type, compiler, arch), e.g. `-s os=Windows`
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Recipe option, e.g. `-o enable_java=True`
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Upstream `shared` option, e.g. `--upstream ubitrack_core=True`
    #[arg(long, value_name = "PACKAGE=VALUE")]
    pub upstream: Vec<String>,

    /// Directory containing `.facade-recipe/config.toml` (defaults to current directory)
    #[arg(long, env = "FACADE_RECIPE_PROJECT")]
    pub project_dir: Option<PathBuf>,
}

impl RecipeArgs {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            settings: self.settings.clone(),
            options: self.options.clone(),
            upstream: self.upstream.clone(),
        }
    }
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    /// Facade source checkout
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// CMake binary directory
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Install prefix
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Installed upstream package to import runtime libraries from
    #[arg(long = "deps", value_name = "DIR")]
    pub deps: Vec<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the CMake commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Facade source checkout
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Destination directory
    #[arg(long)]
    pub dest: PathBuf,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    /// Write the package info to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}
