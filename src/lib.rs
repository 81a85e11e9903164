//! facade-recipe - build recipe for the Ubitrack facade library
//!
//! This crate resolves the facade's build options for a platform, projects
//! them into CMake definitions and package metadata, and drives the CMake
//! build of the facade sources.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{OptionOverlay, OptionSet, PlatformFacts, Recipe, UpstreamOptions};

pub use resolver::{resolve, Resolution};
pub use util::config::Config;
