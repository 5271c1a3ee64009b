//! AppImage packaging library
//!
//! Packages a prebuilt executable, its resource payload and optional extra
//! files into a Linux AppImage:
//! - validates the inputs before touching the filesystem
//! - stages an AppDir (AppRun launcher, desktop entry, icon, `usr/bin`)
//! - runs the architecture's packaging tool and relocates the result
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{AppError, BuildError, BuildResult, CliError, ErrorKind, Result};
