//! `facade-recipe info` command

use anyhow::Result;

use crate::cli::InfoArgs;
use crate::commands::load_recipe_config;
use facade_recipe::ops::{package_info_json, resolve_recipe, write_package_info};
use facade_recipe::Recipe;

pub fn execute(args: InfoArgs) -> Result<()> {
    let config = load_recipe_config(&args.recipe)?;
    let resolution = resolve_recipe(&Recipe::facade(), &config, &args.recipe.resolve_options())?;

    match args.output {
        Some(ref path) => {
            write_package_info(&resolution, path)?;
            tracing::info!("Wrote package info to {}", path.display());
        }
        None => println!("{}", package_info_json(&resolution)?),
    }

    Ok(())
}
