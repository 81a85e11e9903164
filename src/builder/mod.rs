//! Build execution for the facade sources.
//!
//! Turns a [`Resolution`](crate::resolver::Resolution) into work on disk:
//! runtime libraries imported from upstream packages, then the CMake
//! configure/build/install sequence.

pub mod cmake;
pub mod context;
pub mod imports;

pub use cmake::{CMakeBuilder, CMakeStep};
pub use context::BuildLayout;
pub use imports::import_runtime_libs;
