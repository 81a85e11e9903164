//! `facade-recipe resolve` command

use anyhow::{Context, Result};

use crate::cli::ResolveArgs;
use crate::commands::load_recipe_config;
use facade_recipe::ops::{format_resolution, resolve_recipe};
use facade_recipe::Recipe;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let config = load_recipe_config(&args.recipe)?;
    let recipe = Recipe::facade();

    let resolution = resolve_recipe(&recipe, &config, &args.recipe.resolve_options())?;

    if args.json {
        let json = serde_json::to_string_pretty(&resolution)
            .context("failed to serialize resolution")?;
        println!("{}", json);
    } else {
        print!("{}", format_resolution(&resolution));
    }

    Ok(())
}
