//! Core data structures.
//!
//! This module contains the recipe's data model:
//! - Platform facts (OS, build type, compiler, arch)
//! - The closed option schema, option sets and overlays
//! - Package requirements and channels
//! - The recipe descriptor and published package metadata

pub mod dependency;
pub mod metadata;
pub mod options;
pub mod platform;
pub mod recipe;

pub use dependency::{Channel, DependencySpec, Requirement};
pub use metadata::{library_label, PackageInfo};
pub use options::{OptionError, OptionName, OptionOverlay, OptionSet, UpstreamOptions};
pub use platform::{BuildType, Os, PlatformError, PlatformFacts};
pub use recipe::Recipe;
