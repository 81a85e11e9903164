//! Command implementations

pub mod build;
pub mod export;
pub mod info;
pub mod resolve;

use anyhow::{Context, Result};

use crate::cli::RecipeArgs;
use facade_recipe::util::config::{global_config_path, load_config, project_config_path};
use facade_recipe::Config;

/// Load global + project configuration for a command.
pub fn load_recipe_config(args: &RecipeArgs) -> Result<Config> {
    let project_dir = match args.project_dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("failed to get current directory")?,
    };

    let global = global_config_path();
    let project = project_config_path(&project_dir);

    load_config(global.as_deref(), &project)
}
