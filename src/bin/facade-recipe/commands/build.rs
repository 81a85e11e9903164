//! `facade-recipe build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::load_recipe_config;
use facade_recipe::ops::{build, BuildOptions};
use facade_recipe::Recipe;

pub fn execute(args: BuildArgs) -> Result<()> {
    let config = load_recipe_config(&args.recipe)?;
    let recipe = Recipe::facade();

    let opts = BuildOptions {
        resolve: args.recipe.resolve_options(),
        source_dir: args.source_dir,
        build_dir: args.build_dir,
        install_dir: args.install_dir,
        deps: args.deps,
        jobs: args.jobs,
        dry_run: args.dry_run,
    };

    let report = build(&recipe, &config, &opts)?;

    if report.executed {
        println!(
            "Finished {} ({}) in {}",
            recipe.name,
            report.resolution.library(),
            report.layout.install_dir.display()
        );
    } else {
        for command in &report.commands {
            println!("{}", command);
        }
    }

    Ok(())
}
