//! `facade-recipe export` command

use anyhow::Result;

use crate::cli::ExportArgs;
use facade_recipe::ops::export_sources;

pub fn execute(args: ExportArgs) -> Result<()> {
    let copied = export_sources(&args.source_dir, &args.dest)?;
    println!("Exported {} files to {}", copied, args.dest.display());
    Ok(())
}
