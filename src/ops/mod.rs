//! High-level operations.
//!
//! This module contains the implementation of the `facade-recipe` commands.

pub mod export;
pub mod package_info;
pub mod recipe_build;
pub mod resolve;

pub use export::export_sources;
pub use package_info::{package_info_json, write_package_info};
pub use recipe_build::{build, BuildOptions, BuildReport};
pub use resolve::{format_resolution, platform_facts, resolve_recipe, ResolutionSummary, ResolveOptions};
