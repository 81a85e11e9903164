//! Implementation of `facade-recipe export`.

use std::path::Path;

use anyhow::{bail, Result};

use crate::core::recipe::EXPORTS_SOURCES;
use crate::util::fs::{copy_file, copy_tree, ensure_dir};

/// Copy the exported source set from a checkout into `dest`.
///
/// Entries missing from the checkout are skipped; returns the number of
/// files copied.
pub fn export_sources(source_dir: &Path, dest: &Path) -> Result<usize> {
    if !source_dir.join("CMakeLists.txt").is_file() {
        bail!(
            "{} is not a facade checkout (no CMakeLists.txt)",
            source_dir.display()
        );
    }

    ensure_dir(dest)?;

    let mut copied = 0;
    for entry in EXPORTS_SOURCES {
        let src = source_dir.join(entry);
        if src.is_dir() {
            copied += copy_tree(&src, &dest.join(entry))?;
        } else if src.is_file() {
            copy_file(&src, &dest.join(entry))?;
            copied += 1;
        } else {
            tracing::debug!("skipping missing export `{}`", entry);
        }
    }

    tracing::info!("Exported {} files to {}", copied, dest.display());
    Ok(copied)
}
